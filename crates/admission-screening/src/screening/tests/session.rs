use super::common::*;
use crate::screening::domain::{Field, InterviewStatus};
use crate::screening::evaluation::{PolicyField, RiskTier};
use crate::screening::ScreeningSession;

#[test]
fn fresh_session_cannot_submit() {
    let session = ScreeningSession::starting_on(policy(), today());

    assert!(!session.can_submit());
    assert!(session
        .assessment()
        .result
        .hard_error(Field::FullName)
        .is_some());
}

#[test]
fn each_edit_refreshes_the_assessment() {
    let mut session = ScreeningSession::starting_on(policy(), today());
    session.replace_record(valid_record());
    assert!(session.can_submit());

    let assessment = session.edit_record(|record| {
        record.interview_status = Some(InterviewStatus::Rejected);
    });
    assert!(!assessment.can_submit);

    let assessment = session.edit_record(|record| {
        record.interview_status = Some(InterviewStatus::Waitlisted);
        record.offer_letter_sent = true;
    });
    assert!(assessment.can_submit);
}

#[test]
fn commit_re_evaluates_current_record() {
    let mut session = ScreeningSession::starting_on(policy(), today());
    session.replace_record(valid_record());
    session.edit_record(|record| record.screening_score = Some(55.0));
    assert_eq!(session.assessment().risk_tier, RiskTier::Low);

    session.edit_policy(PolicyField::MinScreeningScore, "60");
    assert_eq!(
        session.assessment().risk_tier,
        RiskTier::Low,
        "draft edits must not leak into evaluation"
    );

    let assessment = session.commit_policy();
    assert_eq!(assessment.risk_tier, RiskTier::Medium);
    assert!(assessment.result.exception(Field::ScreeningScore).is_some());
}

#[test]
fn cancel_keeps_committed_policy() {
    let mut session = ScreeningSession::starting_on(policy(), today());
    session.edit_policy(PolicyField::MinAge, "30");
    session.cancel_policy_edit();

    assert_eq!(session.policy().committed().min_age, 18);
    assert!(!session.policy().has_pending_changes());
}

#[test]
fn high_risk_banner_tracks_live_values() {
    let mut session = ScreeningSession::starting_on(policy(), today());
    session.replace_record(high_risk_record());
    assert!(session.high_risk());

    session.reset_record();
    assert!(!session.high_risk());
    assert_eq!(session.record().full_name, "");
}
