//! Property-based tests for the browser view state machine.
//!
//! For any sequence of pipeline results, preference arrivals, navigation
//! reports and user actions:
//! - reader mode never exposes navigation history,
//! - the fetch URL is handed out at most once,
//! - settled content is never reset to pending,
//! - the reader flag only changes through toggles or an untouched preference.

use proptest::prelude::*;
use simplepin::managers::browser_view::{BrowserView, BrowserViewTrait};
use simplepin::types::browser::{BrowserEffect, BrowserEvent, NavigationState, PageRequest};
use simplepin::types::reader::CleanHtml;

fn arb_clean_html() -> impl Strategy<Value = CleanHtml> {
    prop_oneof![
        Just(CleanHtml::Pending),
        Just(CleanHtml::Unavailable),
        "[a-z]{1,12}".prop_map(|s| CleanHtml::Ready(format!("<p>{}</p>", s))),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Event(BrowserEvent),
    BeginFetch,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => any::<bool>().prop_map(|enabled| Op::Event(BrowserEvent::PreferenceLoaded { enabled })),
        1 => arb_clean_html().prop_map(|clean_html| Op::Event(BrowserEvent::ContentLoaded { clean_html })),
        1 => (any::<bool>(), any::<bool>()).prop_map(|(b, f)| Op::Event(
            BrowserEvent::NavigationStateChanged {
                state: NavigationState { can_go_back: b, can_go_forward: f },
            }
        )),
        3 => Just(Op::Event(BrowserEvent::ToggleReaderMode)),
        1 => Just(Op::Event(BrowserEvent::GoBack)),
        1 => Just(Op::Event(BrowserEvent::GoForward)),
        1 => Just(Op::Event(BrowserEvent::Share)),
        1 => Just(Op::BeginFetch),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reader_mode_never_exposes_history(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut view = BrowserView::new(PageRequest::new("https://example.com/a", Some("A")).unwrap());
        let mut fetches = 0;
        let mut toggled = false;

        for op in ops {
            match op {
                Op::BeginFetch => {
                    if view.begin_fetch().is_some() {
                        fetches += 1;
                    }
                }
                Op::Event(event) => {
                    let was_settled = !view.state().clean_html.is_pending();
                    let before = view.state().reader_mode_enabled;
                    let is_toggle = matches!(event, BrowserEvent::ToggleReaderMode);
                    let preference = match &event {
                        BrowserEvent::PreferenceLoaded { enabled } => Some(*enabled),
                        _ => None,
                    };

                    let effects = view.handle(event);

                    let after = view.state().reader_mode_enabled;
                    if is_toggle {
                        toggled = true;
                        prop_assert_ne!(before, after);
                    } else if let Some(enabled) = preference {
                        if toggled {
                            prop_assert_eq!(before, after);
                        } else {
                            prop_assert_eq!(after, enabled);
                        }
                    } else {
                        prop_assert_eq!(before, after);
                    }

                    if was_settled {
                        prop_assert!(!view.state().clean_html.is_pending());
                    }

                    for effect in &effects {
                        if view.state().reader_mode_enabled {
                            prop_assert!(!matches!(
                                effect,
                                BrowserEffect::SurfaceGoBack | BrowserEffect::SurfaceGoForward
                            ));
                        }
                    }
                }
            }

            let state = view.state();
            if state.reader_mode_enabled {
                prop_assert!(!state.can_go_back);
                prop_assert!(!state.can_go_forward);
            }
        }

        prop_assert!(fetches <= 1);
    }
}
