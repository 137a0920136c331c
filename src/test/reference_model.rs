use crate::proto::{
    ACK, COMPLETE, ERROR, NOISE, Packet, ProtocolState, ReferenceModel, ResponseKind, SYN,
    SYN_ACK, Step, TransitionEdge, step,
};

#[test]
fn checksum_error_wins_in_every_state_for_every_symbol() {
    for state in ProtocolState::ALL {
        for symbol in 0..=u8::MAX {
            for checksum in [symbol ^ 0xAA, symbol, symbol ^ 0xFE, 0x00] {
                if checksum == symbol ^ 0xFF {
                    continue;
                }
                let pkt = Packet::with_checksum(symbol, checksum);
                assert_eq!(
                    step(state, &pkt),
                    Step {
                        next: state,
                        output: ERROR
                    },
                    "state={state} symbol={symbol:#04x} checksum={checksum:#04x}"
                );
            }
        }
    }
}

#[test]
fn idle_syn_moves_to_syn_received_with_a() {
    let s = step(ProtocolState::Idle, &Packet::valid(SYN));
    assert_eq!(s.next, ProtocolState::SynReceived);
    assert_eq!(s.output, SYN_ACK);
    assert_eq!(s.output, 0x41);
}

#[test]
fn syn_received_ack_moves_to_ack_received_with_c() {
    let s = step(ProtocolState::SynReceived, &Packet::valid(ACK));
    assert_eq!(s.next, ProtocolState::AckReceived);
    assert_eq!(s.output, COMPLETE);
}

#[test]
fn non_trigger_symbols_echo_and_keep_state() {
    for state in ProtocolState::ALL {
        for symbol in 0..=u8::MAX {
            let trigger = matches!(
                (state, symbol),
                (ProtocolState::Idle, SYN) | (ProtocolState::SynReceived, ACK)
            );
            if trigger {
                continue;
            }
            let s = step(state, &Packet::valid(symbol));
            assert_eq!(s.next, state);
            assert_eq!(s.output, symbol);
        }
    }
}

#[test]
fn corrupted_x_yields_error_without_state_change() {
    let pkt = Packet::with_checksum(b'X', 0xF2);
    let mut model = ReferenceModel::new();
    let tr = model.apply(&pkt);
    assert_eq!(tr.output, b'E');
    assert_eq!(tr.to, ProtocolState::Idle);
    assert_eq!(model.state(), ProtocolState::Idle);
}

#[test]
fn full_handshake_then_noise_is_echoed() {
    let mut model = ReferenceModel::new();

    let t1 = model.apply(&Packet::valid(SYN));
    assert_eq!((t1.output, t1.to), (b'A', ProtocolState::SynReceived));
    assert_eq!(t1.edge(), Some(TransitionEdge::IdleToSynReceived));

    let t2 = model.apply(&Packet::valid(ACK));
    assert_eq!((t2.output, t2.to), (b'C', ProtocolState::AckReceived));
    assert_eq!(t2.edge(), Some(TransitionEdge::SynReceivedToAckReceived));

    let t3 = model.apply(&Packet::valid(NOISE));
    assert_eq!((t3.output, t3.to), (b'Z', ProtocolState::AckReceived));
    assert_eq!(t3.edge(), None);

    // AckReceived 是终态：再来一个 SYN 也只是回显
    let t4 = model.apply(&Packet::valid(SYN));
    assert_eq!((t4.output, t4.to), (b'S', ProtocolState::AckReceived));
}

#[test]
fn reset_mid_handshake_restarts_identically() {
    let mut model = ReferenceModel::new();
    let first = model.apply(&Packet::valid(SYN));
    assert_eq!(model.state(), ProtocolState::SynReceived);

    model.reset();
    assert_eq!(model.state(), ProtocolState::Idle);

    let second = model.apply(&Packet::valid(SYN));
    assert_eq!(first, second);
    assert_eq!(model.state(), ProtocolState::SynReceived);
}

#[test]
fn reset_from_every_state_returns_to_idle() {
    for target in ProtocolState::ALL {
        let mut model = ReferenceModel::new();
        let script: &[u8] = match target {
            ProtocolState::Idle => &[],
            ProtocolState::SynReceived => &[SYN],
            ProtocolState::AckReceived => &[SYN, ACK],
        };
        for s in script {
            model.apply(&Packet::valid(*s));
        }
        assert_eq!(model.state(), target);
        model.reset();
        assert_eq!(model.state(), ProtocolState::Idle);
    }
}

#[test]
fn ack_in_idle_is_just_echoed() {
    let s = step(ProtocolState::Idle, &Packet::valid(ACK));
    assert_eq!(s.next, ProtocolState::Idle);
    assert_eq!(s.output, ACK);
}

#[test]
fn apply_classifies_every_response_kind() {
    let mut oracle = ReferenceModel::new();

    let echo = oracle.apply(&Packet::valid(NOISE));
    assert_eq!(echo.response, ResponseKind::Echo);

    let bad = oracle.apply(&Packet::corrupted(SYN));
    assert_eq!(bad.response, ResponseKind::Error);
    assert_eq!(bad.to, ProtocolState::Idle);

    let syn = oracle.apply(&Packet::valid(SYN));
    assert_eq!(syn.response, ResponseKind::SynAck);
    assert!(syn.response.is_state_transition());

    assert_eq!(oracle.apply(&Packet::valid(b'X')).response, ResponseKind::Echo);

    let ack = oracle.apply(&Packet::valid(ACK));
    assert_eq!(ack.response, ResponseKind::AckComplete);
    assert!(ack.response.is_state_transition());

    // 握手完成后：包括 SYN 在内都算数据传输，坏包仍然是 Error
    for symbol in [SYN, ACK, NOISE, b'Y'] {
        let tr = oracle.apply(&Packet::valid(symbol));
        assert_eq!(tr.response, ResponseKind::DataTransfer);
        assert!(!tr.response.is_state_transition());
    }
    assert_eq!(
        oracle.apply(&Packet::corrupted(b'Y')).response,
        ResponseKind::Error
    );
}
