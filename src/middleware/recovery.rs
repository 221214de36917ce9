//! Last-resort panic boundary.
//!
//! Handlers report expected failures through `Result<_, AppError>`. A panic
//! anywhere below this layer is caught here, logged with a backtrace and
//! answered with the generic `500` error body. The server keeps running.
//!
//! The backtrace is taken by a process-wide panic hook while the panicking
//! frames are still on the stack, and handed to [`handle_panic`] through a
//! thread-local slot. `CatchPanicLayer` catches on the thread that panicked.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic;
use std::sync::Once;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use rollcall_core::ErrorBody;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

thread_local! {
    static PANIC_BACKTRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Installs the backtrace-capturing panic hook. Later calls are no-ops.
///
/// The previously installed hook still runs after the capture.
pub fn install_panic_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::force_capture().to_string();
            PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(backtrace));
            previous(info);
        }));
    });
}

fn take_panic_backtrace() -> String {
    PANIC_BACKTRACE
        .with(|slot| slot.borrow_mut().take())
        .unwrap_or_else(|| Backtrace::force_capture().to_string())
}

pub fn recovery_layer() -> CatchPanicLayer<PanicHandler> {
    install_panic_hook();
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    }
}

pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let backtrace = take_panic_backtrace();
    error!(
        panic = %panic_message(payload.as_ref()),
        backtrace = %backtrace,
        "Recovered from panic while handling request"
    );

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::internal())).into_response()
}
