use clap::Parser;
use doctor_directory::core::controller::PageController;
use doctor_directory::utils::error::ErrorSeverity;
use doctor_directory::utils::{logger, validation::Validate};
use doctor_directory::{CliConfig, DirectorySession, HttpDoctorSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting doctor-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.directory_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    let source = HttpDoctorSource::new(config.endpoint(), config.timeout())?;
    let query = cli.query.clone().unwrap_or_default();
    let mut session = DirectorySession::open(&source, &config, &query).await;

    if let Some(message) = session.controller().error() {
        eprintln!("❌ {}", message);
        std::process::exit(exit_code(ErrorSeverity::Medium));
    }

    if let Some(partial) = &cli.suggest {
        let mut updates = session.watch_suggestions();
        session.type_search(partial);
        if !partial.trim().is_empty() {
            while updates.borrow_and_update().loading {
                updates.changed().await?;
            }
        }
        for name in session.suggestions().shown() {
            println!("{}", name);
        }
        return Ok(());
    }

    cli.apply_to(session.controller_mut());
    print_listing(session.controller());
    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn print_listing(controller: &PageController) {
    let filters = controller.filters();
    if controller.active_filter_count() > 0 {
        let mut summary = format!("Active filters: {}", controller.active_filter_count());
        if let Some(consultation_type) = filters.consultation_type {
            summary.push_str(&format!(" | Consultation: {}", consultation_type));
        }
        if !filters.specialties.is_empty() {
            summary.push_str(&format!(" | Specialties: {} selected", filters.specialties.len()));
        }
        if !filters.sort_by.is_none() {
            summary.push_str(&format!(" | Sorted by: {}", filters.sort_by.label()));
        }
        println!("{}", summary);
    }

    match controller.showing_range() {
        Some((first, last)) => println!(
            "Showing {} - {} of {} doctors",
            first,
            last,
            controller.total_count()
        ),
        None => println!("No doctors found. Try adjusting your filters."),
    }

    for doctor in controller.visible_doctors() {
        let modes: Vec<&str> = doctor.consultation_types.iter().map(|t| t.as_str()).collect();
        println!();
        println!("{} ({})", doctor.name, doctor.qualification);
        println!(
            "  {} | {} yrs | ★ {:.1} ({} reviews) | ₹{}",
            doctor.specialty, doctor.experience, doctor.rating, doctor.review_count, doctor.fees
        );
        println!("  {} | {}", modes.join(", "), doctor.availability.join(", "));
        if let Some(location) = &doctor.location {
            println!("  {}", location);
        }
    }

    if controller.total_pages() > 1 {
        println!();
        println!("Page {} of {}", controller.page(), controller.total_pages());
    }
    println!("?{}", controller.query_string());
}
