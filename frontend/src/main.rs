//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use backend::{config::SummaryConfig, server_extra::{THING_SELECT_PATH, thing_select::thing_select_route}};

        Ok(dioxus::server::router(App)
            .route(THING_SELECT_PATH, thing_select_route(SummaryConfig::from_env())))
    });
}
