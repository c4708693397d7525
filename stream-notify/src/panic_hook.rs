use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{PanicHookInfo, take_hook};
use std::thread;

/// Installs a global panic hook that reports panics through `tracing`.
///
/// Panics inside a channel check unwind into that task's `JoinError`, so the
/// hook only records them; the previous hook still runs afterwards.
pub fn install() {
    let previous_hook = take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
                .unwrap_or_else(|| "<unknown>".to_string());
            let current = thread::current();
            let thread_name = current.name().unwrap_or("<unnamed>");

            tracing::error!(
                target: "stream_notify::panic",
                thread = thread_name,
                location = %location,
                backtrace = %Backtrace::capture(),
                "panic: {}",
                payload_message(panic_info.payload())
            );
        }));

        previous_hook(panic_info);
    }));
}

/// Text carried by a panic payload, if it is a string.
fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return s;
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s;
    }
    "<non-string payload>"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_message() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(payload_message(literal.as_ref()), "boom");

        let formatted: Box<dyn Any + Send> = Box::new(format!("channel {} failed", "foo"));
        assert_eq!(payload_message(formatted.as_ref()), "channel foo failed");

        let other: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(payload_message(other.as_ref()), "<non-string payload>");
    }

    #[test]
    fn test_caught_panic_payload() {
        let payload = std::panic::catch_unwind(|| panic!("adapter exploded")).unwrap_err();
        assert_eq!(payload_message(payload.as_ref()), "adapter exploded");
    }
}
