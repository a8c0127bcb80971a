use daybook::{CategoryQuery, ExpenseQuery, Result, SelectedDate, Store, config};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;

    // 4. Open the store and prepare the schema
    let store = Store::open(&app_config).await?;
    store
        .ensure_ready()
        .await
        .inspect(|_| info!("Database ready."))
        .inspect_err(|e| error!("Failed to prepare database: {}", e))?;

    // 5. Optional YYYY-MM-DD argument selects the day to show
    let selected_date = SelectedDate::new();
    if let Some(day) = std::env::args().nth(1) {
        selected_date.set_iso(&day)?;
    }

    let categories = CategoryQuery::mount(store.clone()).await?;
    let expenses = ExpenseQuery::mount(store, selected_date.clone()).await?;

    println!("{}", selected_date.heading());
    let items = expenses.expenses().await?;
    if items.is_empty() {
        println!("  No expenses for {}.", selected_date.heading().to_lowercase());
    }
    for expense in &items {
        println!(
            "  {:<24} {:>10.2}  {:<14} {}",
            expense.title,
            expense.amount,
            expense.category_label(),
            expense.payment_method.as_deref().unwrap_or("Cash"),
        );
    }
    println!("  Total: {:.2}", expenses.total().await);
    println!("Categories: {}", categories.names().await.join(", "));

    Ok(())
}
