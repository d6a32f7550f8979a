//! Integration tests for the workflow engine.
//!
//! These run the engine over the whole built-in catalog and check the
//! properties admin tooling relies on.

use std::collections::HashSet;

use atelier_core::{
    ClientStatus, InternalStatus, StatusCategory, WorkflowDefinition, WorkflowEngine,
};

const GENERAL: [InternalStatus; 3] = [
    InternalStatus::AwaitingClientInfo,
    InternalStatus::OnHold,
    InternalStatus::Cancelled,
];

fn engine() -> &'static WorkflowEngine {
    WorkflowEngine::standard()
}

fn slugs(statuses: &[InternalStatus]) -> Vec<&'static str> {
    statuses.iter().map(|s| s.as_str()).collect()
}

// =============================================================================
// Totality
// =============================================================================

#[test]
fn test_lookups_are_total_for_garbage_input() {
    let inputs = [
        "",
        " ",
        "PENDING",
        "pending ",
        "unknown-garbage-status",
        "🙂",
        "in_production",
    ];

    for input in inputs {
        assert!(engine().display_info(input, true).is_none(), "{input:?}");
        assert!(engine().display_info(input, false).is_none(), "{input:?}");
        assert_eq!(engine().client_status_for(input), ClientStatus::PendingReview);
        assert!(engine().next_possible_statuses(input).is_empty());
        assert!(!engine().is_valid_transition(input, "cancelled"));
        assert!(!engine().is_valid_transition("pending", input));
    }
}

#[test]
fn test_unknown_status_has_no_next_statuses() {
    assert!(engine().next_possible_statuses("unknown-garbage-status").is_empty());
}

// =============================================================================
// Resolver invariants
// =============================================================================

#[test]
fn test_next_statuses_never_contain_current() {
    for &status in engine().all_internal_statuses() {
        assert!(
            !engine().next_statuses(status).contains(&status),
            "{status} offers itself"
        );
    }
}

#[test]
fn test_next_statuses_have_no_duplicates() {
    for &status in engine().all_internal_statuses() {
        let next = engine().next_statuses(status);
        let unique: HashSet<_> = next.iter().collect();
        assert_eq!(unique.len(), next.len(), "{status} offers a status twice");
    }
}

#[test]
fn test_validator_agrees_with_resolver() {
    for &from in engine().all_internal_statuses() {
        let next = engine().next_possible_statuses(from.as_str());
        for &to in engine().all_internal_statuses() {
            assert_eq!(
                engine().is_valid_transition(from.as_str(), to.as_str()),
                next.contains(&to),
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn test_general_statuses_always_reachable_outside_special_phase() {
    for &status in engine().all_internal_statuses() {
        if status.category() == StatusCategory::Special || engine().is_terminal(status) {
            continue;
        }
        let next = engine().next_statuses(status);
        for general in GENERAL {
            assert!(
                general == status || next.contains(&general),
                "{status} cannot reach {general}"
            );
        }
    }
}

#[test]
fn test_on_hold_reaches_other_general_statuses() {
    let next = engine().next_statuses(InternalStatus::OnHold);
    assert!(next.contains(&InternalStatus::AwaitingClientInfo));
    assert!(next.contains(&InternalStatus::Cancelled));
}

#[test]
fn test_terminal_statuses_have_no_way_out() {
    assert!(engine().next_possible_statuses("completed").is_empty());
    assert!(engine().next_possible_statuses("refunded").is_empty());
}

#[test]
fn test_cancelled_only_moves_to_refunded() {
    assert_eq!(
        engine().next_statuses(InternalStatus::Cancelled),
        vec![InternalStatus::Refunded]
    );
    assert!(engine().is_valid_transition("cancelled", "refunded"));
    assert!(!engine().is_valid_transition("cancelled", "pending"));
}

#[test]
fn test_resolution_is_deterministic() {
    for &status in engine().all_internal_statuses() {
        assert_eq!(
            engine().next_statuses(status),
            engine().next_statuses(status)
        );
    }

    // A freshly built engine resolves identically to the shared one.
    let fresh = WorkflowEngine::new(WorkflowDefinition::standard()).expect("valid definition");
    for &status in engine().all_internal_statuses() {
        assert_eq!(fresh.next_statuses(status), engine().next_statuses(status));
    }
}

#[test]
fn test_next_statuses_sorted_by_phase() {
    for &status in engine().all_internal_statuses() {
        let next = engine().next_statuses(status);
        assert!(
            next.windows(2).all(|pair| {
                pair.first().map(|s| s.category()) <= pair.last().map(|s| s.category())
            }),
            "{status}: {:?}",
            slugs(&next)
        );
    }
}

// =============================================================================
// Mapping
// =============================================================================

#[test]
fn test_every_internal_status_maps_to_a_client_status() {
    for &status in engine().all_internal_statuses() {
        let client = engine().client_status(status);
        assert!(engine().all_client_statuses().contains(&client));
        assert_eq!(engine().client_status_for(status.as_str()), client);
    }
}

#[test]
fn test_every_status_has_display_info() {
    for &status in engine().all_internal_statuses() {
        let info = engine()
            .display_info(status.as_str(), true)
            .expect("internal display info");
        assert_eq!(info.category, status.category());
    }
    for &status in engine().all_client_statuses() {
        let info = engine().client_info(status).expect("client display info");
        assert!(!info.requires_action);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_pending_offers_strict_edges_siblings_and_forward_entry_points() {
    let next = engine().next_possible_statuses("pending");
    for expected in [
        InternalStatus::ReviewingRequest,
        InternalStatus::InConsultation,
        InternalStatus::Cancelled,
        InternalStatus::AwaitingClientInfo,
        InternalStatus::Sketching,
        InternalStatus::PreparingQuote,
    ] {
        assert!(next.contains(&expected), "missing {expected}");
    }
    assert!(!next.contains(&InternalStatus::Completed));
}

#[test]
fn test_quality_check_can_go_back_to_polishing() {
    assert!(engine().is_valid_transition("quality-check", "polishing"));
}

#[test]
fn test_casting_shows_client_in_production() {
    assert_eq!(engine().client_status_for("casting"), ClientStatus::InProduction);
}

#[test]
fn test_production_can_step_back_to_preparation() {
    let next = engine().next_statuses(InternalStatus::Engraving);
    assert!(next.contains(&InternalStatus::OrderingMaterials));
    assert!(next.contains(&InternalStatus::ReadyForPickup));
    assert!(next.contains(&InternalStatus::Casting));
}

#[test]
fn test_pending_cannot_jump_to_completed() {
    assert!(!engine().is_valid_transition("pending", "completed"));
}
