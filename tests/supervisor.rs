mod common;

mod tests {
    use embassy_time::Instant;
    use xmas_tree_controller::network::{
        CLIENT_ID_CAPACITY, MessageQueue, PAYLOAD_CAPACITY, TOPIC_CAPACITY, parse_mode_command,
    };
    use xmas_tree_controller::{
        ConnectionPhase, ConnectivityConfig, ConnectivitySupervisor, ControllerState,
        InboundMessage, Mode,
    };

    use super::common::{MockTransport, QUEUE_SIZE, SequenceRng};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_parse_mode_command() {
        assert_eq!(parse_mode_command(b"0"), Some(Mode::Off));
        assert_eq!(parse_mode_command(b"2"), Some(Mode::RainbowCycle));
        // Only the first byte counts
        assert_eq!(parse_mode_command(b"42"), Some(Mode::Twinkle));
        assert_eq!(parse_mode_command(b"5"), None);
        assert_eq!(parse_mode_command(b"/"), None);
        assert_eq!(parse_mode_command(b"fade"), None);
        assert_eq!(parse_mode_command(b""), None);
    }

    #[test]
    fn test_no_attempt_without_link() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), ConnectivityConfig::DEFAULT);
        let mut transport = MockTransport::new(queue.sender());
        let mut rng = SequenceRng::new(&[1]);
        let mut state = ControllerState::new(Mode::Off, 128, 32);

        for ms in (0..20_000).step_by(100) {
            supervisor.poll(at(ms), false, &mut transport, &mut rng, &mut state);
        }
        assert!(transport.client_ids.is_empty());
        assert_eq!(supervisor.phase(), ConnectionPhase::Disconnected);
    }

    #[test]
    fn test_failed_attempts_are_spaced_by_retry_interval() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), ConnectivityConfig::DEFAULT);
        let mut transport = MockTransport::new(queue.sender());
        transport.accept = false;
        let mut rng = SequenceRng::new(&[0xBEEF]);
        let mut state = ControllerState::new(Mode::Off, 128, 32);

        let mut attempts = Vec::new();
        for ms in (0..30_000).step_by(100) {
            let before = transport.client_ids.len();
            supervisor.poll(at(ms), true, &mut transport, &mut rng, &mut state);
            if transport.client_ids.len() > before {
                attempts.push(ms);
            }
            assert_eq!(supervisor.phase(), ConnectionPhase::Disconnected);
        }

        assert!(attempts.len() >= 5);
        for pair in attempts.windows(2) {
            assert!(pair[1] - pair[0] >= 5000, "attempts at {:?}", pair);
        }
        assert_eq!(supervisor.last_attempt(), attempts.last().map(|&ms| at(ms)));
        assert!(transport.subscribed.is_empty());
        assert!(transport.published.is_empty());
    }

    #[test]
    fn test_connect_publishes_status_and_subscribes() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let config = ConnectivityConfig::DEFAULT;
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), config);
        let mut transport = MockTransport::new(queue.sender());
        let mut rng = SequenceRng::new(&[0xBEEF]);
        let mut state = ControllerState::new(Mode::Off, 128, 32);

        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);

        assert_eq!(supervisor.phase(), ConnectionPhase::Connected);
        assert_eq!(transport.client_ids, vec!["ESP8266Client-beef".to_owned()]);
        assert_eq!(
            transport.published,
            vec![(config.status_topic.to_owned(), b"1".to_vec())]
        );
        assert_eq!(transport.subscribed, vec![config.mode_topic.to_owned()]);
        assert_eq!(transport.pumps, 1);
    }

    #[test]
    fn test_reconnect_resubscribes() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), ConnectivityConfig::DEFAULT);
        let mut transport = MockTransport::new(queue.sender());
        let mut rng = SequenceRng::new(&[1, 2]);
        let mut state = ControllerState::new(Mode::Off, 128, 32);

        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);
        assert_eq!(transport.subscribed.len(), 1);

        transport.connected = false;
        supervisor.poll(at(1000), true, &mut transport, &mut rng, &mut state);
        assert_eq!(supervisor.phase(), ConnectionPhase::Disconnected);
        assert_eq!(transport.client_ids.len(), 1);

        supervisor.poll(at(5001), true, &mut transport, &mut rng, &mut state);
        assert_eq!(supervisor.phase(), ConnectionPhase::Connected);
        assert_eq!(transport.client_ids.len(), 2);
        assert_eq!(transport.subscribed.len(), 2);
        assert_eq!(transport.published.len(), 2);
    }

    #[test]
    fn test_command_sets_mode_directly() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let config = ConnectivityConfig::DEFAULT;
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), config);
        let mut transport = MockTransport::new(queue.sender());
        let mut rng = SequenceRng::new(&[1]);
        let mut state = ControllerState::new(Mode::Twinkle, 128, 32);

        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);
        transport.deliver(config.mode_topic, b"2");
        supervisor.poll(at(10), true, &mut transport, &mut rng, &mut state);

        assert_eq!(state.mode(), Mode::RainbowCycle);
    }

    #[test]
    fn test_malformed_commands_are_ignored() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let config = ConnectivityConfig::DEFAULT;
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), config);
        let mut transport = MockTransport::new(queue.sender());
        let mut rng = SequenceRng::new(&[1]);
        let mut state = ControllerState::new(Mode::Fade, 128, 32);

        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);
        transport.deliver(config.mode_topic, b"7");
        transport.deliver(config.mode_topic, b"x");
        transport.deliver(config.mode_topic, b"");
        supervisor.poll(at(10), true, &mut transport, &mut rng, &mut state);

        assert_eq!(state.mode(), Mode::Fade);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_messages_wait_while_disconnected() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let config = ConnectivityConfig::DEFAULT;
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), config);
        let mut transport = MockTransport::new(queue.sender());
        transport.accept = false;
        let mut rng = SequenceRng::new(&[1]);
        let mut state = ControllerState::new(Mode::Fade, 128, 32);

        transport.deliver(config.mode_topic, b"1");
        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);

        assert_eq!(transport.pumps, 0);
        assert_eq!(state.mode(), Mode::Fade);
    }

    #[test]
    fn test_long_prefix_keeps_random_suffix() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let config = ConnectivityConfig {
            client_id_prefix: "xmastree-living-room-controller-",
            ..ConnectivityConfig::DEFAULT
        };
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), config);
        let mut transport = MockTransport::new(queue.sender());
        transport.accept = false;
        let mut rng = SequenceRng::new(&[0xBEEF, 0x1234]);
        let mut state = ControllerState::new(Mode::Off, 128, 32);

        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);
        supervisor.poll(at(5001), true, &mut transport, &mut rng, &mut state);

        assert_eq!(
            transport.client_ids,
            vec![
                "xmastree-living-room-controlbeef".to_owned(),
                "xmastree-living-room-control1234".to_owned(),
            ]
        );
        assert!(transport.client_ids.iter().all(|id| id.len() <= CLIENT_ID_CAPACITY));
    }

    #[test]
    fn test_oversized_message_still_commands() {
        let queue: MessageQueue<QUEUE_SIZE> = MessageQueue::new();
        let mut supervisor = ConnectivitySupervisor::new(queue.receiver(), ConnectivityConfig::DEFAULT);
        let mut transport = MockTransport::new(queue.sender());
        let mut rng = SequenceRng::new(&[1]);
        let mut state = ControllerState::new(Mode::Twinkle, 128, 32);

        supervisor.poll(at(0), true, &mut transport, &mut rng, &mut state);

        let topic = "xmastree/".repeat(8);
        let mut payload = vec![b'2'];
        payload.extend_from_slice(&[b' '; 80]);
        assert_eq!(payload.len(), 81);
        transport.deliver(&topic, &payload);
        supervisor.poll(at(10), true, &mut transport, &mut rng, &mut state);

        assert_eq!(state.mode(), Mode::RainbowCycle);
    }

    #[test]
    fn test_inbound_message_is_cut_to_capacity() {
        let payload = [b'3'; 100];
        let message = InboundMessage::new("short", &payload);
        assert_eq!(message.topic(), "short");
        assert_eq!(message.payload().len(), PAYLOAD_CAPACITY);
        assert_eq!(message.payload()[0], b'3');

        // Never splits a multi-byte char
        let topic = format!("a{}", "ü".repeat(40));
        let message = InboundMessage::new(&topic, b"1");
        assert_eq!(message.topic().len(), TOPIC_CAPACITY - 1);
        assert!(topic.starts_with(message.topic()));
        assert_eq!(message.payload(), b"1");
    }
}
