//! Hooks mirroring the framework-free state containers into dioxus signals.

use std::rc::Rc;

use common::{
    repository_info::{RepositoryInfoState, RevisionSource},
    summary_view_state::{SummarySnapshot, SummaryViewState},
};
use dioxus::prelude::*;

/// The component-scoped overview state and a signal tracking its snapshots.
pub fn use_summary_view_state() -> (Rc<SummaryViewState>, ReadSignal<SummarySnapshot>) {
    let state = use_hook(|| Rc::new(SummaryViewState::default()));
    let snapshot = use_signal({
        let state = state.clone();
        move || state.snapshot()
    });

    let subscription = use_hook({
        let state = state.clone();
        move || {
            state.subscribe(move |s: &SummarySnapshot| {
                let mut snapshot = snapshot;
                snapshot.set(s.clone());
            })
        }
    });
    use_drop({
        let state = state.clone();
        move || {
            state.unsubscribe(subscription);
        }
    });

    (state, snapshot.into())
}

/// Revision line for the footer; fetched once per mount.
pub fn use_repository_info<S: RevisionSource + 'static>(source: S) -> ReadSignal<String> {
    let state = use_hook(|| Rc::new(RepositoryInfoState::default()));
    let info = use_signal(String::new);

    let subscription = use_hook({
        let state = state.clone();
        move || {
            state.subscribe(move |s: &String| {
                let mut info = info;
                info.set(s.clone());
            })
        }
    });
    use_drop({
        let state = state.clone();
        move || {
            state.unsubscribe(subscription);
        }
    });
    use_hook({
        let state = state.clone();
        move || {
            spawn(async move {
                state.init(&source).await;
            });
        }
    });

    info.into()
}
