use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

use freelance_match::workflows::view::CandidateCard;
use freelance_match::{
    init_telemetry, service_metrics, FreelanceMatchConfig, HttpMatchService, JobField, JobId,
    JobPostingWorkflow, MatchService, SessionProvider, StaticSession, SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "freelance-match")]
#[command(about = "Post a job listing and match freelancers by skill")]
#[command(long_about = "freelance-match creates a job listing on the matching service, shows the \
                       freelancers whose skills match it, and confirms the ones you keep. \
                       Start with 'freelance-match post --title ... --skills ...'.")]
struct Cli {
    /// Company the job is posted for
    #[arg(long, global = true, help = "Company id (overrides service.owner_id)")]
    company: Option<String>,
    /// Matching service base URL
    #[arg(long, global = true, help = "Service URL (overrides service.base_url)")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a job listing and review the freelancers matched to it
    Post {
        #[arg(long, help = "Job title")]
        title: String,
        #[arg(long, default_value = "", help = "Job description")]
        description: String,
        #[arg(long, help = "Required skills, free text")]
        skills: String,
        #[arg(long, default_value = "0", help = "How many freelancers you want to hire")]
        amount: String,
        #[arg(long, value_name = "FREELANCER_ID", help = "Drop a matched freelancer before confirming")]
        remove: Vec<String>,
        #[arg(long, help = "Confirm the remaining freelancers as matches")]
        confirm: bool,
    },
    /// List the freelancers matched to an existing job
    Candidates {
        #[arg(long, help = "Job id returned when the listing was created")]
        job_id: String,
    },
    /// Print the effective configuration (token masked)
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = FreelanceMatchConfig::load_env_file();
    let mut config = FreelanceMatchConfig::load().context("Failed to load configuration")?;
    if let Some(company) = cli.company {
        config.service.owner_id = company;
    }
    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
    }

    init_telemetry(&config.observability)?;

    match env_file {
        Ok(Some(path)) => info!(path = %path.display(), "Loaded environment variables"),
        Ok(None) => {}
        Err(e) => warn!("Ignoring .env file: {e:#}"),
    }

    let result = match cli.command {
        Commands::Post {
            title,
            description,
            skills,
            amount,
            remove,
            confirm,
        } => tokio::runtime::Runtime::new()?.block_on(async {
            let draft = [
                (JobField::Title, title),
                (JobField::Description, description),
                (JobField::HardSkills, skills),
                (JobField::Amount, amount),
            ];
            post_command(&config, draft, remove, confirm).await
        }),
        Commands::Candidates { job_id } => tokio::runtime::Runtime::new()?
            .block_on(async { candidates_command(&config, &job_id).await }),
        Commands::Config => config_command(&config),
    };

    if config.observability.metrics_enabled {
        service_metrics().log_stats();
    }

    result
}

fn build_session(config: &FreelanceMatchConfig) -> Result<StaticSession> {
    if config.service.owner_id.trim().is_empty() {
        bail!(
            "No company configured: pass --company or set FREELANCE_MATCH_SERVICE__OWNER_ID"
        );
    }
    Ok(StaticSession::new(
        config.service.owner_id.clone(),
        config.service.token.clone(),
    ))
}

async fn post_command(
    config: &FreelanceMatchConfig,
    draft: [(JobField, String); 4],
    remove: Vec<String>,
    confirm: bool,
) -> Result<()> {
    let session = build_session(config)?;
    let service = HttpMatchService::from_config(&config.service)?;

    let mut workflow = JobPostingWorkflow::new(Arc::new(service), Arc::new(session))
        .with_settings(config.workflow.clone());
    for (field, value) in draft {
        workflow.set(field, value);
    }

    println!("🚀 Posting job listing to {}", config.service.base_url);
    let outcome = workflow.submit().await;

    match &outcome {
        SubmitOutcome::Ready { job_id, candidates } => {
            println!("✅ Job {job_id} created, {candidates} freelancer(s) matched");
        }
        SubmitOutcome::CreationFailed { .. } => {
            println!("❌ Job listing was not created");
        }
        SubmitOutcome::LookupFailed { job_id, .. } => {
            println!("⚠️  Job {job_id} created but matching freelancers could not be loaded");
        }
    }
    println!();
    print!("{}", workflow.view());

    if let Some(error) = outcome.error() {
        bail!("{error}");
    }

    for freelancer_id in &remove {
        if workflow.remove_candidate(freelancer_id)?.is_none() {
            println!("⚠️  {freelancer_id} is not among the matched freelancers");
        }
    }

    if confirm {
        let outcome = workflow.confirm().await?;
        println!();
        if outcome.is_confirmed() {
            println!(
                "✅ Confirmed {} freelancer(s) for job {}",
                outcome.payload.len(),
                outcome.job_id
            );
        } else {
            println!("❌ Confirmation for job {} was not saved", outcome.job_id);
        }
        println!();
        print!("{}", workflow.view());

        if let Some(error) = outcome.error {
            bail!("{error}");
        }
    }

    Ok(())
}

async fn candidates_command(config: &FreelanceMatchConfig, job_id: &str) -> Result<()> {
    let session = build_session(config)?;
    let job_id = JobId::new(job_id).context("Job id must not be empty")?;
    let service = HttpMatchService::from_config(&config.service)?;

    let candidates = service
        .find_matching_skills(&session.current()?, &job_id)
        .await?;

    println!("🔍 {} freelancer(s) matched to job {job_id}", candidates.len());
    for candidate in &candidates {
        let card = CandidateCard::from(candidate);
        println!(
            "   • {} ({}) [{}] {}",
            card.name, candidate.freelancer_id, card.skill, card.avatar
        );
    }

    Ok(())
}

fn config_command(config: &FreelanceMatchConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(&config.redacted())?;
    println!("{rendered}");
    Ok(())
}
