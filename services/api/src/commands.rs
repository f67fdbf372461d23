use crate::infra::{open_service, read_record};
use admission_screening::config::AppConfig;
use admission_screening::error::AppError;
use admission_screening::screening::{
    parse_date, Assessment, AuditEntry, PolicyConfig, RuleEngine, SubmissionError,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding the application record
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the assessment as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// JSON file holding the application record
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct AuditClearArgs {
    /// Confirm that every audit entry should be deleted
    #[arg(long)]
    pub(crate) yes: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let record = read_record(&args.record)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let assessment = RuleEngine::assess(&record, &config.policy, today);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", render_assessment(&assessment));
    }
    Ok(())
}

pub(crate) fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = open_service(&config)?;
    let record = read_record(&args.record)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    match service.submit_on(&record, today) {
        Ok(entry) => {
            println!("Submission recorded");
            print!("{}", render_entry(&entry));
            Ok(())
        }
        Err(SubmissionError::Blocked { hard_errors }) => {
            println!("Submission blocked:");
            for (field, message) in &hard_errors {
                println!("  - {field}: {message}");
            }
            Err(SubmissionError::Blocked { hard_errors }.into())
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn run_audit_list() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = open_service(&config)?;
    let entries = service.audit_log();

    if entries.is_empty() {
        println!("Audit log is empty");
        return Ok(());
    }

    println!("Audit log ({} entries, newest first)", entries.len());
    for entry in &entries {
        print!("{}", render_entry(entry));
    }
    Ok(())
}

pub(crate) fn run_audit_clear(args: AuditClearArgs) -> Result<(), AppError> {
    if !args.yes {
        return Err(AppError::ConfirmationRequired(
            "clearing the audit log (pass --yes)",
        ));
    }

    let config = AppConfig::load()?;
    let service = open_service(&config)?;
    let removed = service.audit_log().len();
    service.clear_audit_log()?;
    println!("Cleared {removed} audit entries");
    Ok(())
}

pub(crate) fn run_policy_show() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    print!("{}", render_policy(&config.policy));
    Ok(())
}

pub(crate) fn render_assessment(assessment: &Assessment) -> String {
    let mut out = String::new();
    let verdict = if assessment.can_submit {
        "admissible"
    } else {
        "inadmissible"
    };
    let _ = writeln!(out, "Verdict: {verdict}");
    let _ = writeln!(
        out,
        "Risk tier: {} ({} exception(s))",
        assessment.risk_tier,
        assessment.result.exception_count()
    );

    if !assessment.result.hard_errors.is_empty() {
        let _ = writeln!(out, "Hard errors:");
        for (field, message) in &assessment.result.hard_errors {
            let _ = writeln!(out, "  - {field}: {message}");
        }
    }
    if !assessment.result.exceptions.is_empty() {
        let _ = writeln!(out, "Exceptions:");
        for (field, message) in &assessment.result.exceptions {
            let _ = writeln!(out, "  - {field}: {message}");
        }
    }
    out
}

pub(crate) fn render_entry(entry: &AuditEntry) -> String {
    let status = entry
        .interview_status
        .map(|status| status.label())
        .unwrap_or("-");
    format!(
        "  [{}] {} <{}> status={} exceptions={} risk={} id={}\n",
        entry.timestamp,
        entry.full_name,
        entry.email,
        status,
        entry.exception_count,
        entry.risk_level,
        entry.id
    )
}

pub(crate) fn render_policy(policy: &PolicyConfig) -> String {
    format!(
        "Minimum age: {}\nMax future graduation years: {}\nMinimum percentage: {}\nMinimum CGPA: {}\nMinimum screening score: {}\nHigh risk above: {} exception(s)\n",
        policy.min_age,
        policy.max_future_grad_years,
        policy.min_percentage,
        policy.min_cgpa,
        policy.min_screening_score,
        policy.high_risk_threshold
    )
}
