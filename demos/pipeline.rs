//! A small middleware pipeline over one event: validate first, then
//! enrich, then render — wired together through priorities and the
//! response chain. Invalid input stops the pipeline early.

use hibiki::{Event, EventManager, Outcome, Params, Response, Value, listener};

fn pipeline() -> EventManager {
    let mut events = EventManager::new();

    // Highest priority: reject empty messages and stop the chain.
    events.attach_with_priority(
        "message.posted",
        listener(|event: &mut Event, _previous: Response| {
            let body = event.param("body").and_then(Value::as_str).unwrap_or("");
            if body.trim().is_empty() {
                event.stop_propagation(true);
                return Some(Value::from("rejected: empty message"));
            }
            None
        }),
        100,
    );

    // Enrichment: annotate the event for everyone downstream.
    events.attach_with_priority(
        "message.posted",
        listener(|event: &mut Event, _previous: Response| {
            let words = event
                .param("body")
                .and_then(Value::as_str)
                .map(|b| b.split_whitespace().count())
                .unwrap_or(0);
            event.params_mut().insert("words", words);
            None
        }),
        10,
    );

    // Default priority: render the final response from the enriched event.
    events.attach(
        "message.posted",
        listener(|event: &mut Event, _previous: Response| {
            let body = event.param("body").and_then(Value::as_str).unwrap_or("");
            let words = event.param("words").and_then(Value::as_u64).unwrap_or(0);
            Some(Value::from(format!("posted {words} words: {body:?}")))
        }),
    );

    events
}

fn post(events: &mut EventManager, body: &str) -> hibiki::Result {
    let params: Params = [("body", body)].into_iter().collect();
    match events.trigger_with("message.posted", None, params)? {
        Outcome::Handled(Some(response)) => println!("{response}"),
        Outcome::Handled(None) => println!("handled, no response"),
        Outcome::Unhandled => println!("nobody listening"),
    }
    Ok(())
}

fn main() -> hibiki::Result {
    tracing_subscriber::fmt().init();

    let mut events = pipeline();
    post(&mut events, "an event dispatcher in one file")?;
    post(&mut events, "   ")?;

    Ok(())
}
