use crate::proto::{ACK, InputClass, NOISE, Packet, ReferenceModel, SYN, TransitionEdge};
use crate::tb::Coverage;

fn drive(cov: &mut Coverage, model: &mut ReferenceModel, pkt: Packet) {
    let tr = model.apply(&pkt);
    cov.sample(&pkt, &tr);
}

#[test]
fn empty_coverage_is_zero_percent() {
    let cov = Coverage::new();
    assert_eq!(cov.input_percent(), 0.0);
    assert_eq!(cov.transition_percent(), 0.0);
    assert_eq!(cov.samples(), 0);
}

#[test]
fn handshake_hits_both_transitions_and_half_the_inputs() {
    let mut cov = Coverage::new();
    let mut model = ReferenceModel::new();
    drive(&mut cov, &mut model, Packet::valid(SYN));
    drive(&mut cov, &mut model, Packet::valid(ACK));

    assert_eq!(cov.input_hits(InputClass::Syn), 1);
    assert_eq!(cov.input_hits(InputClass::Ack), 1);
    assert_eq!(cov.input_percent(), 50.0);
    assert_eq!(cov.transition_percent(), 100.0);
}

#[test]
fn corrupted_syn_counts_input_but_not_transition() {
    let mut cov = Coverage::new();
    let mut model = ReferenceModel::new();
    drive(&mut cov, &mut model, Packet::corrupted(SYN));

    assert_eq!(cov.input_hits(InputClass::Syn), 1);
    assert_eq!(cov.transition_hits(TransitionEdge::IdleToSynReceived), 0);
    assert_eq!(cov.transition_percent(), 0.0);
}

#[test]
fn bins_are_monotonic_and_report_lists_every_bin() {
    let mut cov = Coverage::new();
    let mut model = ReferenceModel::new();
    for pkt in [
        Packet::valid(SYN),
        Packet::valid(NOISE),
        Packet::valid(b'X'),
        Packet::valid(b'Y'),
        Packet::valid(SYN),
    ] {
        drive(&mut cov, &mut model, pkt);
    }
    cov.record_reset();

    assert_eq!(cov.input_hits(InputClass::Misc), 2);
    assert_eq!(cov.input_hits(InputClass::Syn), 2);
    assert_eq!(cov.input_percent(), 75.0);
    assert_eq!(cov.transition_percent(), 50.0);

    let report = cov.report();
    assert_eq!(report.inputs.len(), 4);
    assert_eq!(report.inputs["misc"], 2);
    assert_eq!(report.inputs["ack"], 0);
    assert_eq!(report.transitions["idle_to_syn"], 1);
    assert_eq!(report.transitions["syn_to_ack"], 0);
    assert_eq!(report.resets, 1);
}
