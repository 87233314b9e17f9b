use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use ledgerly::{
    PasswordHash, ValidatedPassword,
    account::{NewAccount, create_account},
    account_type::{NewAccountType, create_account_type},
    auth::get_or_create_token,
    category::{CategoryKind, NewCategory, create_category},
    initialize_db,
    transaction::{NewTransaction, create_transaction},
    user::{NewUser, create_user},
};

/// A utility for creating a test database for the REST API server of ledgerly.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("testpass123"),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(
        NewUser {
            email: "test@example.com".to_owned(),
            name: "Test User".to_owned(),
            password_hash,
        },
        &connection,
    )?;
    let token = get_or_create_token(user.id, &connection)?;
    println!("Bearer token for test@example.com: {}", token.key);

    println!("Creating account types, accounts, and categories...");

    let wallet = create_account_type(
        NewAccountType {
            name: "Wallet".to_owned(),
            icon_name: "wallet".to_owned(),
        },
        &connection,
    )?;
    create_account_type(
        NewAccountType {
            name: "Savings".to_owned(),
            icon_name: "piggy-bank".to_owned(),
        },
        &connection,
    )?;

    let checking = create_account(
        NewAccount {
            name: "Checking".to_owned(),
            description: "Daily spending".to_owned(),
            account_type_id: wallet.id,
            user_id: user.id,
        },
        &connection,
    )?;

    let salary = create_category(
        NewCategory {
            name: "Salary".to_owned(),
            icon_name: "salary".to_owned(),
            kind: CategoryKind::Income,
            user_id: user.id,
        },
        &connection,
    )?;
    let groceries = create_category(
        NewCategory {
            name: "Groceries".to_owned(),
            icon_name: "cart".to_owned(),
            kind: CategoryKind::Expense,
            user_id: user.id,
        },
        &connection,
    )?;

    println!("Creating transactions...");

    let today = OffsetDateTime::now_utc().date();
    create_transaction(
        NewTransaction {
            amount: 2500.0,
            description: "Monthly salary".to_owned(),
            paid: true,
            transaction_date: today - Duration::days(14),
            category_id: salary.id,
            account_id: checking.id,
            user_id: user.id,
        },
        &connection,
    )?;
    create_transaction(
        NewTransaction {
            amount: 84.3,
            description: "Weekly groceries".to_owned(),
            paid: true,
            transaction_date: today - Duration::days(3),
            category_id: groceries.id,
            account_id: checking.id,
            user_id: user.id,
        },
        &connection,
    )?;
    create_transaction(
        NewTransaction {
            amount: 42.5,
            description: "Groceries".to_owned(),
            paid: false,
            transaction_date: today,
            category_id: groceries.id,
            account_id: checking.id,
            user_id: user.id,
        },
        &connection,
    )?;

    println!("Success!");

    Ok(())
}
