//! Smallest possible setup: one listener, one trigger.

use hibiki::{Event, EventManager, Params, Response, Value, listener};

fn main() -> hibiki::Result {
    tracing_subscriber::fmt().init();

    let mut events = EventManager::new();

    events.attach(
        "user.created",
        listener(|event: &mut Event, _previous: Response| {
            let name = event
                .param("name")
                .and_then(Value::as_str)
                .unwrap_or("someone");
            println!("welcome, {name}!");
            None
        }),
    );

    let mut params = Params::new();
    params.insert("name", "Ada");
    events.trigger_with("user.created", None, params)?;

    Ok(())
}
