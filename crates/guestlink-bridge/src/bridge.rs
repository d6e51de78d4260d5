//! The bridge object: router, queues, relay, and stdin in one place.

use bytes::Bytes;

use crate::channel::{Channel, ChannelQueue};
use crate::envelope::{GuestMessage, HostMessage};
use crate::session::Session;
use crate::stdin::{CommandInjector, StdinEmulator};
use crate::transport::HostTransport;

/// Lifecycle capabilities the guest exposes to the router.
///
/// Both hooks default to no-ops so a guest that doesn't care about debugger
/// attachment can pass [`NoHooks`].
pub trait GuestHooks {
    fn on_debugger_client_connected(&mut self) {}
    fn on_debugger_client_disconnected(&mut self) {}
}

/// Guest with no interest in lifecycle events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl GuestHooks for NoHooks {}

/// One guest's communication state, constructed once at process start.
///
/// Owns every queue exclusively; the guest and host only observe effects
/// through the methods below, which all run on the caller's single thread.
/// Every guest- and host-facing call is total: it always returns a value and
/// never panics or propagates an error.
pub struct Bridge<T, H> {
    session: Session,
    transport: T,
    hooks: H,
    command: ChannelQueue,
    debug: ChannelQueue,
    stdin: StdinEmulator,
    injector: CommandInjector,
    announced: bool,
}

impl<T: HostTransport, H: GuestHooks> Bridge<T, H> {
    pub fn new(session: Session, transport: T, hooks: H) -> Self {
        Self {
            session,
            transport,
            hooks,
            command: ChannelQueue::new(),
            debug: ChannelQueue::new(),
            stdin: StdinEmulator::new(),
            injector: CommandInjector::new(),
            announced: false,
        }
    }

    /// Replace the default pause between injected stdin characters.
    ///
    /// Only meaningful before the first [`submit_command`](Self::submit_command).
    pub fn with_inject_delay(mut self, delay: std::time::Duration) -> Self {
        self.injector = CommandInjector::with_delay(delay);
        self
    }

    /// The operating mode selected at startup.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Emit the one-shot `loaded` notification to the host.
    ///
    /// Sent at most once per process, and only in embedded mode. Safe to
    /// call repeatedly.
    pub fn announce(&mut self) {
        if self.announced {
            return;
        }
        let Some(id) = self.session.id() else {
            return;
        };
        let msg = GuestMessage::Loaded {
            session_id: id.as_str().to_string(),
        };
        self.announced = true;
        self.send(&msg);
    }

    /// Route one inbound host message.
    ///
    /// Unknown tags are dropped without error, by policy.
    pub fn handle_message(&mut self, msg: HostMessage) {
        match msg {
            HostMessage::WriteCommandChannel { data } => {
                tracing::trace!(
                    size = data.len(),
                    channel = Channel::Command.name(),
                    "queued inbound payload"
                );
                self.command.push(data);
            }
            HostMessage::WriteDebugChannel { data } => {
                tracing::trace!(
                    size = data.len(),
                    channel = Channel::Debug.name(),
                    "queued inbound payload"
                );
                self.debug.push(data);
            }
            HostMessage::DebuggerClientConnected => {
                self.hooks.on_debugger_client_connected();
            }
            HostMessage::DebuggerClientDisconnected => {
                self.hooks.on_debugger_client_disconnected();
            }
            HostMessage::Unknown => {
                tracing::debug!("ignoring unknown host message tag");
            }
        }
    }

    /// Remove and frame the oldest pending command payload.
    ///
    /// `None` means "no data available now", not "channel closed". Never
    /// blocks; called once per guest scheduling tick.
    pub fn poll_command_channel(&mut self) -> Option<Bytes> {
        Self::poll_queue(&mut self.command, Channel::Command)
    }

    /// Remove and frame the oldest pending debug payload.
    pub fn poll_debug_channel(&mut self) -> Option<Bytes> {
        Self::poll_queue(&mut self.debug, Channel::Debug)
    }

    /// Relay guest command output to the host, framed and fire-and-forget.
    pub fn emit_command(&mut self, payload: &[u8]) {
        self.emit(Channel::Command, payload);
    }

    /// Relay guest debug output to the host, framed and fire-and-forget.
    pub fn emit_debug(&mut self, payload: &[u8]) {
        self.emit(Channel::Debug, payload);
    }

    /// Poll the synthetic stdin. See [`StdinEmulator::poll`].
    pub fn poll_stdin(&mut self) -> Option<i32> {
        self.stdin.poll()
    }

    /// Queue a terminal command line for character-at-a-time injection.
    pub fn submit_command(&mut self, command: &str) {
        self.injector.submit(command);
    }

    /// Advance command injection by one character code.
    ///
    /// Returns `true` while injection work remains; the embedder sleeps
    /// [`inject_delay`](Self::inject_delay) between steps.
    pub fn injector_step(&mut self) -> bool {
        self.injector.step(&mut self.stdin)
    }

    pub fn inject_delay(&self) -> std::time::Duration {
        self.injector.inject_delay()
    }

    fn poll_queue(queue: &mut ChannelQueue, channel: Channel) -> Option<Bytes> {
        let payload = queue.pop()?;
        match guestlink_frame::frame(&payload) {
            Ok(framed) => Some(framed),
            Err(err) => {
                // Keep the poll total: the entry is dropped, not resurfaced.
                tracing::warn!(error = %err, channel = channel.name(), "dropping unframeable payload");
                None
            }
        }
    }

    fn emit(&mut self, channel: Channel, payload: &[u8]) {
        let Some(id) = self.session.id() else {
            tracing::trace!(channel = channel.name(), "standalone mode, dropping guest output");
            return;
        };

        let framed = match guestlink_frame::frame(payload) {
            Ok(framed) => framed,
            Err(err) => {
                tracing::warn!(error = %err, channel = channel.name(), "dropping unframeable guest output");
                return;
            }
        };

        let session_id = id.as_str().to_string();
        let data = framed.to_vec();
        let msg = match channel {
            Channel::Command => GuestMessage::WriteCommandBuffer { session_id, data },
            Channel::Debug => GuestMessage::WriteDebugBuffer { session_id, data },
        };
        self.send(&msg);
    }

    // Fire-and-forget: a transport fault is invisible to the guest, which
    // has no retry or backpressure obligation.
    fn send(&mut self, msg: &GuestMessage) {
        if let Err(err) = self.transport.send(msg) {
            tracing::warn!(error = %err, "dropping outbound envelope");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::session::Session;

    #[derive(Default)]
    struct CapturingTransport {
        sent: Vec<GuestMessage>,
    }

    impl HostTransport for CapturingTransport {
        fn send(&mut self, msg: &GuestMessage) -> Result<(), TransportError> {
            self.sent.push(msg.clone());
            Ok(())
        }
    }

    impl HostTransport for &mut CapturingTransport {
        fn send(&mut self, msg: &GuestMessage) -> Result<(), TransportError> {
            self.sent.push(msg.clone());
            Ok(())
        }
    }

    struct FailingTransport;

    impl HostTransport for FailingTransport {
        fn send(&mut self, _msg: &GuestMessage) -> Result<(), TransportError> {
            Err(TransportError::Io(std::io::Error::from(
                std::io::ErrorKind::BrokenPipe,
            )))
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        connected: usize,
        disconnected: usize,
    }

    impl GuestHooks for &mut RecordingHooks {
        fn on_debugger_client_connected(&mut self) {
            self.connected += 1;
        }

        fn on_debugger_client_disconnected(&mut self) {
            self.disconnected += 1;
        }
    }

    fn embedded(token: &str) -> Session {
        Session::from_token(Some(token.to_string()))
    }

    #[test]
    fn end_to_end_command_roundtrip() {
        let mut transport = CapturingTransport::default();
        let mut bridge = Bridge::new(embedded("sim-9"), &mut transport, NoHooks);

        // Host sends "*IDN?".
        bridge.handle_message(HostMessage::WriteCommandChannel {
            data: vec![0x2A, 0x49, 0x44, 0x4E, 0x3F],
        });

        // Guest polls and sees the framed payload.
        let framed = bridge.poll_command_channel().unwrap();
        assert_eq!(
            framed.as_ref(),
            &[0, 0, 0, 5, 0x2A, 0x49, 0x44, 0x4E, 0x3F]
        );
        assert!(bridge.poll_command_channel().is_none());

        // Guest responds.
        bridge.emit_command(b"EEZ,BB3,0,1.0");
        drop(bridge);

        assert_eq!(transport.sent.len(), 1);
        match &transport.sent[0] {
            GuestMessage::WriteCommandBuffer { session_id, data } => {
                assert_eq!(session_id, "sim-9");
                assert_eq!(
                    data.as_slice(),
                    guestlink_frame::frame(b"EEZ,BB3,0,1.0").unwrap().as_ref()
                );
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn channel_queues_are_independent() {
        let mut bridge = Bridge::new(embedded("s"), CapturingTransport::default(), NoHooks);

        bridge.handle_message(HostMessage::WriteCommandChannel { data: vec![1] });
        bridge.handle_message(HostMessage::WriteDebugChannel { data: vec![2] });
        bridge.handle_message(HostMessage::WriteCommandChannel { data: vec![3] });

        assert_eq!(
            bridge.poll_debug_channel().unwrap().as_ref(),
            &[0, 0, 0, 1, 2]
        );
        assert!(bridge.poll_debug_channel().is_none());

        assert_eq!(
            bridge.poll_command_channel().unwrap().as_ref(),
            &[0, 0, 0, 1, 1]
        );
        assert_eq!(
            bridge.poll_command_channel().unwrap().as_ref(),
            &[0, 0, 0, 1, 3]
        );
        assert!(bridge.poll_command_channel().is_none());
    }

    #[test]
    fn fifo_order_preserved_per_channel() {
        let mut bridge = Bridge::new(embedded("s"), CapturingTransport::default(), NoHooks);

        for byte in 0u8..5 {
            bridge.handle_message(HostMessage::WriteCommandChannel { data: vec![byte] });
        }
        for expected in 0u8..5 {
            let framed = bridge.poll_command_channel().unwrap();
            assert_eq!(framed.as_ref(), &[0, 0, 0, 1, expected]);
        }
        assert!(bridge.poll_command_channel().is_none());
    }

    #[test]
    fn lifecycle_tags_invoke_hooks() {
        let mut hooks = RecordingHooks::default();
        let mut bridge = Bridge::new(embedded("s"), CapturingTransport::default(), &mut hooks);

        bridge.handle_message(HostMessage::DebuggerClientConnected);
        bridge.handle_message(HostMessage::DebuggerClientConnected);
        bridge.handle_message(HostMessage::DebuggerClientDisconnected);
        drop(bridge);

        assert_eq!(hooks.connected, 2);
        assert_eq!(hooks.disconnected, 1);
    }

    #[test]
    fn unknown_tag_is_dropped_silently() {
        let mut transport = CapturingTransport::default();
        let mut bridge = Bridge::new(embedded("s"), &mut transport, NoHooks);

        bridge.handle_message(HostMessage::Unknown);

        assert!(bridge.poll_command_channel().is_none());
        assert!(bridge.poll_debug_channel().is_none());
        drop(bridge);
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn announce_sends_loaded_exactly_once() {
        let mut transport = CapturingTransport::default();
        let mut bridge = Bridge::new(embedded("sim-3"), &mut transport, NoHooks);

        bridge.announce();
        bridge.announce();
        bridge.announce();
        drop(bridge);

        assert_eq!(
            transport.sent,
            vec![GuestMessage::Loaded {
                session_id: "sim-3".to_string()
            }]
        );
    }

    #[test]
    fn standalone_mode_sends_nothing() {
        let mut transport = CapturingTransport::default();
        let mut bridge = Bridge::new(Session::Standalone, &mut transport, NoHooks);

        bridge.announce();
        bridge.emit_command(b"resp");
        bridge.emit_debug(b"dbg");
        drop(bridge);

        assert!(transport.sent.is_empty());
    }

    #[test]
    fn transport_failure_is_swallowed() {
        let mut bridge = Bridge::new(embedded("s"), FailingTransport, NoHooks);

        bridge.announce();
        bridge.emit_command(b"lost");
        // Inbound routing still works after failed sends.
        bridge.handle_message(HostMessage::WriteCommandChannel { data: vec![9] });
        assert_eq!(
            bridge.poll_command_channel().unwrap().as_ref(),
            &[0, 0, 0, 1, 9]
        );
    }

    #[test]
    fn stdin_path_flows_through_bridge() {
        let mut bridge = Bridge::new(Session::Standalone, CapturingTransport::default(), NoHooks);

        bridge.submit_command("ab");
        while bridge.injector_step() {}

        assert_eq!(bridge.poll_stdin(), Some('a' as i32));
        assert_eq!(bridge.poll_stdin(), Some('b' as i32));
        assert_eq!(bridge.poll_stdin(), Some(crate::stdin::CARRIAGE_RETURN));
        assert_eq!(bridge.poll_stdin(), None);
        assert_eq!(bridge.poll_stdin(), Some(0));
    }

    #[test]
    fn emitted_debug_payload_uses_debug_tag() {
        let mut transport = CapturingTransport::default();
        let mut bridge = Bridge::new(embedded("sim-d"), &mut transport, NoHooks);

        bridge.emit_debug(&[0xDE, 0xAD]);
        drop(bridge);

        assert!(matches!(
            transport.sent.as_slice(),
            [GuestMessage::WriteDebugBuffer { .. }]
        ));
    }
}
