use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytes::BytesMut;
use guestlink_bridge::{
    Bridge, GuestHooks, HostMessage, HostTransport, JsonLineTransport, Session,
};
use guestlink_frame::decode_frame;

use crate::cmd::RunArgs;
use crate::exit::{CliError, CliResult, SUCCESS};

/// Guest stand-in that just logs debugger attachment.
struct LoggingHooks;

impl GuestHooks for LoggingHooks {
    fn on_debugger_client_connected(&mut self) {
        tracing::info!("debugger client connected");
    }

    fn on_debugger_client_disconnected(&mut self) {
        tracing::info!("debugger client disconnected");
    }
}

/// Host-side harness around one bridge instance.
///
/// Inbound envelopes arrive one JSON object per stdin line; outbound
/// envelopes leave one per stdout line. A built-in echo guest polls both
/// channels after every routed envelope and reflects each payload back on
/// the channel it arrived on.
pub fn run(args: RunArgs) -> CliResult<i32> {
    let session = Session::from_token(args.session_id);
    tracing::info!(embedded = session.is_embedded(), "starting bridge");

    let transport = JsonLineTransport::new(std::io::stdout());
    let mut bridge = Bridge::new(session, transport, LoggingHooks)
        .with_inject_delay(Duration::from_millis(args.inject_delay_ms));
    bridge.announce();

    if let Some(command) = &args.command {
        inject_command(&mut bridge, command);
    }

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let stdin = std::io::stdin();
    let mut routed = 0usize;

    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(error = %err, "stdin read failed, stopping");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HostMessage>(&line) {
            Ok(msg) => bridge.handle_message(msg),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed envelope");
                continue;
            }
        }
        routed += 1;

        echo_guest_tick(&mut bridge);

        if args.count.is_some_and(|count| routed >= count) {
            break;
        }
    }

    tracing::info!(routed, "bridge stopped");
    Ok(SUCCESS)
}

/// Drive the character injector to completion, honoring the inter-code
/// delay, then drain what the guest would read.
fn inject_command<T: HostTransport, H: GuestHooks>(bridge: &mut Bridge<T, H>, command: &str) {
    bridge.submit_command(command);
    while bridge.injector_step() {
        thread::sleep(bridge.inject_delay());
    }

    // The first idle poll after real input returns None, so this drain
    // terminates without consuming the stall-avoidance heartbeat.
    while let Some(code) = bridge.poll_stdin() {
        tracing::debug!(code, "guest stdin consumed");
    }
}

/// One scheduling tick of the built-in echo guest: poll each channel,
/// unframe, and emit the payload back.
fn echo_guest_tick<T: HostTransport, H: GuestHooks>(bridge: &mut Bridge<T, H>) {
    while let Some(framed) = bridge.poll_command_channel() {
        let mut buf = BytesMut::from(framed.as_ref());
        if let Some(payload) = decode_frame(&mut buf) {
            bridge.emit_command(&payload);
        }
    }

    while let Some(framed) = bridge.poll_debug_channel() {
        let mut buf = BytesMut::from(framed.as_ref());
        if let Some(payload) = decode_frame(&mut buf) {
            bridge.emit_debug(&payload);
        }
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
