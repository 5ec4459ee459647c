//! Two "framework modules" wired together through the shared hub.
//!
//! Run with: cargo run -p app_hub --example shared_hub

use app_hub::{ChannelForwarder, props, shared};
use hub_macros::Extension;

#[derive(Extension, Clone, Debug)]
struct Router {
    routes: Vec<String>,
}

fn install_router() {
    shared().extend(props! {
        "router" => Router {
            routes: vec!["home".into(), "settings".into()],
        },
    });
}

fn install_config() {
    shared().extend(props! { "name" => "demo", "debug" => true });
}

fn main() {
    install_config();
    install_router();

    let hub = shared();
    println!(
        "booted '{}' with {} route(s)",
        hub.get::<&str>("name").unwrap_or_default(),
        hub.read("router", |router: &Router| router.routes.len())
            .unwrap_or_default(),
    );

    // Push-based: a handler fires synchronously on every emit.
    let subscription = hub.on("page:change", |page: &String| {
        println!("navigated to {page}");
    });

    // Pull-based: the same event stream, drained through a channel.
    let (forwarder, pages) = ChannelForwarder::<String>::with_receiver();
    forwarder.attach(hub, "page:change");

    hub.emit("page:change", &String::from("home"));
    hub.emit("page:change", &String::from("settings"));

    hub.off(subscription);
    while let Ok(page) = pages.try_recv() {
        println!("history recorded {page}");
    }

    // Back to the pristine state, as a test suite would between cases.
    hub.reset();
    assert!(hub.keys().is_empty());
    println!("reset: {} key(s) remain", hub.len());
}
