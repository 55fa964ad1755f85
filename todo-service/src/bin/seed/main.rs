use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use todo_service::account::errors::AccountError;
use todo_service::account::models::Account;
use todo_service::account::models::EmailAddress;
use todo_service::account::models::FullName;
use todo_service::account::models::Password;
use todo_service::account::models::RegisterCommand;
use todo_service::account::models::Username;
use todo_service::account::ports::AccountRepository;
use todo_service::account::ports::AccountServicePort;
use todo_service::account::service::AccountService;
use todo_service::config::Config;
use todo_service::outbound::notifications::LogResetNotifier;
use todo_service::repositories::PostgresAccountRepository;
use todo_service::repositories::PostgresTodoRepository;
use todo_service::todo::models::CreateTodoCommand;
use todo_service::todo::models::ListTodosCommand;
use todo_service::todo::models::TodoTitle;
use todo_service::todo::ports::TodoServicePort;
use todo_service::todo::service::TodoService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct SeedAccount {
    username: &'static str,
    email: &'static str,
    password: &'static str,
    full_name: &'static str,
}

struct SeedTodo {
    owner: &'static str,
    title: &'static str,
    description: &'static str,
    status: &'static str,
    priority: &'static str,
}

const ACCOUNTS: &[SeedAccount] = &[
    SeedAccount {
        username: "admin",
        email: "admin@example.com",
        password: "admin123",
        full_name: "Administrator",
    },
    SeedAccount {
        username: "aditya_prayoga",
        email: "aditya@brainmatics.com",
        password: "password123",
        full_name: "Aditya Prayoga",
    },
    SeedAccount {
        username: "zaim_fauzan",
        email: "zaim@brainmatics.com",
        password: "password123",
        full_name: "Zaim Fauzan",
    },
];

const TODOS: &[SeedTodo] = &[
    SeedTodo {
        owner: "admin",
        title: "Complete project documentation",
        description: "Write comprehensive README and API documentation",
        status: "in_progress",
        priority: "high",
    },
    SeedTodo {
        owner: "admin",
        title: "Review pull requests",
        description: "Review and merge pending pull requests",
        status: "pending",
        priority: "medium",
    },
    SeedTodo {
        owner: "admin",
        title: "Fix authentication bug",
        description: "Resolve token expiration issue",
        status: "completed",
        priority: "high",
    },
    SeedTodo {
        owner: "aditya_prayoga",
        title: "Learn hexagonal architecture",
        description: "Study ports and adapters in Rust",
        status: "in_progress",
        priority: "low",
    },
    SeedTodo {
        owner: "aditya_prayoga",
        title: "Build REST API",
        description: "Create a REST API using axum",
        status: "pending",
        priority: "high",
    },
    SeedTodo {
        owner: "aditya_prayoga",
        title: "Write unit tests",
        description: "Add unit tests for all services",
        status: "pending",
        priority: "medium",
    },
];

async fn seed_account<S>(
    service: &S,
    repository: &PostgresAccountRepository,
    seed: &SeedAccount,
) -> anyhow::Result<Account>
where
    S: AccountServicePort,
{
    let command = RegisterCommand::new(
        Username::new(seed.username.to_string())?,
        EmailAddress::new(seed.email.to_string())?,
        Password::new(seed.password.to_string())?,
        FullName::new(seed.full_name.to_string())?,
    );

    match service.register(command).await {
        Ok(account) => {
            tracing::info!(username = seed.username, email = seed.email, "Created account");
            Ok(account)
        }
        Err(AccountError::UsernameTaken(_)) | Err(AccountError::EmailTaken(_)) => {
            tracing::warn!(username = seed.username, "Account already exists, skipping");
            repository
                .find_by_username(seed.username)
                .await?
                .with_context(|| {
                    format!("account {} exists but could not be loaded", seed.username)
                })
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(config.database.connect_options())
        .await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let account_service = AccountService::new(
        Arc::clone(&account_repository),
        Arc::new(LogResetNotifier::new()),
        authenticator,
        config.server.public_url.clone(),
    );
    let todo_service = TodoService::new(Arc::new(PostgresTodoRepository::new(pg_pool)));

    let mut accounts = Vec::with_capacity(ACCOUNTS.len());
    for seed in ACCOUNTS {
        let account = seed_account(&account_service, &account_repository, seed).await?;
        accounts.push(account);
    }

    for seed in TODOS {
        let Some(owner) = accounts
            .iter()
            .find(|account| account.username.as_str() == seed.owner)
        else {
            continue;
        };

        let existing = todo_service
            .list_todos(owner.id, ListTodosCommand::default())
            .await?;
        if existing.todos.iter().any(|todo| todo.title == seed.title) {
            tracing::warn!(
                title = seed.title,
                owner = seed.owner,
                "Todo already exists, skipping"
            );
            continue;
        }

        let todo = todo_service
            .create_todo(
                owner.id,
                CreateTodoCommand {
                    title: TodoTitle::new(seed.title.to_string())?,
                    description: seed.description.to_string(),
                    status: seed.status.to_string(),
                    priority: seed.priority.to_string(),
                    due_date: None,
                },
            )
            .await?;
        tracing::info!(
            title = seed.title,
            owner = seed.owner,
            status = %todo.status,
            "Created todo"
        );
    }

    tracing::info!("Seeding completed");
    for seed in ACCOUNTS {
        tracing::info!(username = seed.username, password = seed.password, "Demo credentials");
    }

    Ok(())
}
