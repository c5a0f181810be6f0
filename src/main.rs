use clap::Parser;
use cult_class_booker::utils::logger;
use cult_class_booker::{BookingConfig, BookingEngine, BookingError, CliArgs, CultClient};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.json_logs);

    tracing::info!("Starting cult-class-booker");

    let config = match BookingConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Booking config: {:?}", config);

    let client = match CultClient::new(&config) {
        Ok(client) => client,
        Err(e) => fail(e),
    };

    let engine = BookingEngine::new(client, config);
    match engine.run().await {
        Ok(outcome) => println!(
            "✅ Booked activityId={} (workoutId={}) after {} attempt(s)",
            outcome.candidate.activity_id, outcome.candidate.workout_id, outcome.attempts
        ),
        Err(e) => fail(e),
    }
}

fn fail(e: BookingError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e);
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
