//! Maintenance commands for the content database. Each command is a
//! one-shot run: connect, do the work, report, exit.

use bouwcms::db::{get_db_pool, init_db};
use bouwcms::{seed_data, session};
use env_logger::Env;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    bouwcms::app_config::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    if command == "help" || command == "--help" {
        print_usage();
        return Ok(());
    }

    init_db(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.")).await;
    let db = get_db_pool();

    match command {
        "defaults" => {
            let inserted = seed_data::seed_defaults(db).await?;
            println!("Seeded {} rows", inserted);
        }
        "create-admin" => {
            let email = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("create-admin requires an email argument"))?;
            let password = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("create-admin requires a password argument"))?;
            let hash = session::hash_password(password)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
            let user = seed_data::create_admin(
                db,
                email,
                hash,
                args.get(3).cloned(),
                args.get(4).cloned(),
            )
            .await?;
            println!("Admin account ready: {}", user.email);
        }
        "clean-duplicates" => {
            let deleted = seed_data::clean_duplicate_services(db).await?;
            println!("Removed {} duplicate services", deleted);
        }
        "purge-backups" => {
            let deleted = seed_data::purge_expired_backups(db).await?;
            println!("Purged {} expired backups", deleted);
        }
        "purge-sessions" => {
            let deleted = seed_data::purge_expired_sessions(db).await?;
            println!("Purged {} expired sessions", deleted);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("Usage: seed <command> [args]");
    println!();
    println!("Commands:");
    println!("  defaults                        Insert default content rows where missing");
    println!("  create-admin <email> <password> [first-name] [last-name]");
    println!("                                  Create or refresh an admin account");
    println!("  clean-duplicates                Remove services sharing a Dutch title");
    println!("  purge-backups                   Delete backups past their advisory expiry");
    println!("  purge-sessions                  Delete expired server-side session rows");
}
