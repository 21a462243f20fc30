//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `userstore_core` linkage.
//! - Run the sample add/query/export flow against a data file.
//!
//! Usage: `userstore [DATA_FILE] [EXPORT_FILE]`; logs go to `./logs`.

use log::info;
use std::process::ExitCode;
use userstore_core::{StoreConfig, StoreError, UserService};

const SAMPLE_USERS: [(&str, &str, i64); 3] = [
    ("Nguyễn Văn An", "an@example.com", 25),
    ("Trần Thị Bình", "binh@example.com", 30),
    ("Lê Văn Cường", "cuong@example.com", 28),
];

fn main() -> ExitCode {
    println!("userstore_core ping={}", userstore_core::ping());
    println!("userstore_core version={}", userstore_core::core_version());

    if let Err(err) = userstore_core::init_logging(userstore_core::default_log_level(), "logs") {
        eprintln!("warning: file logging disabled: {err}");
    }

    let mut args = std::env::args().skip(1);
    let mut config = StoreConfig::default();
    if let Some(data_file) = args.next() {
        config.data_file = data_file.into();
    }
    if let Some(export_file) = args.next() {
        config.export_file = export_file.into();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = UserService::open(config)?;

    for (name, email, age) in SAMPLE_USERS {
        match service.add_user(name, email, age) {
            Ok(id) => info!("event=cli_add module=cli status=ok id={id}"),
            // Re-running against the same file keeps the earlier rows.
            Err(StoreError::DuplicateKey { .. }) => {}
            Err(err) => return Err(err.into()),
        }
    }

    println!("Total users: {}", service.user_count());
    println!("Active users: {}", service.active_user_count());
    println!(
        "Users aged 20-35: {}",
        service.users_by_age_range(20, 35)?.len()
    );
    println!(
        "Users with 'Nguyễn' in name: {}",
        service.search_users_by_name("Nguyễn").len()
    );

    let rows = service.export_csv()?;
    println!(
        "Exported {rows} users to {}",
        service.export_file().display()
    );
    Ok(())
}
