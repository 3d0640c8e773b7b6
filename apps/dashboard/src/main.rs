use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dashboard::backend::{Backend, HttpBackend};
use dashboard::config::Config;
use dashboard::models::FilterField;
use dashboard::render;
use dashboard::route::Route;
use dashboard::storage::{FileStorage, KeyValueStore};
use dashboard::stores::{AuthStore, FilterStore};
use dashboard::views::{
    JobDetailView, JobsView, Landing, NewJobWizard, ResumeDetailView, WizardStep,
};

#[derive(Parser)]
#[command(name = "prorank")]
#[command(about = "Terminal dashboard for ProRank resume review jobs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List review jobs
    Jobs {
        /// Fetch the list a second time once it has loaded
        #[arg(long)]
        refresh: bool,
    },
    /// Show a job's resumes, statistics and filters
    Job {
        id: i64,
        /// Only show resumes whose file name contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Flip saved filter flags, then reload with them applied
        #[arg(long, value_delimiter = ',')]
        toggle: Vec<FilterField>,
        /// Turn every saved filter flag off, then reload
        #[arg(long)]
        clear_filters: bool,
        /// Reset filters and reload unfiltered
        #[arg(long, conflicts_with_all = ["toggle", "clear_filters"])]
        refresh: bool,
    },
    /// Edit a job's saved filter flags without fetching resumes
    Filter {
        job_id: i64,
        #[arg(long, value_delimiter = ',')]
        toggle: Vec<FilterField>,
        #[arg(long)]
        clear: bool,
    },
    /// Show one resume's score breakdown
    Resume { job_id: i64, resume_id: i64 },
    /// Create a review job from a Google Drive folder
    NewJob,
    /// Sign in; without --token prints the browser login URL
    Login {
        /// Value of the `access_token` cookie set by the browser login
        #[arg(long)]
        token: Option<String>,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show the signed-in account
    Whoami,
}

const SIGN_IN_HINT: &str = "Not signed in. Run `prorank login`.";

struct App {
    config: Config,
    storage: Arc<dyn KeyValueStore>,
    backend: Arc<dyn Backend>,
    auth: AuthStore,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration first so RUST_LOG from .env is honoured
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the rendered pages
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "dashboard={level},prorank={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "prorank v{} using backend {}",
        env!("CARGO_PKG_VERSION"),
        config.backend_url
    );

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::new(&config.data_dir));
    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::new(&config.backend_url, config.http_timeout, storage.clone())
            .context("failed to build HTTP client")?,
    );
    let auth = AuthStore::new(backend.clone(), storage.clone());
    let mut app = App {
        config,
        storage,
        backend,
        auth,
    };

    match cli.command {
        Commands::Jobs { refresh } => {
            print!("{}", jobs_page(&mut app, refresh).await);
            Ok(())
        }
        Commands::Job {
            id,
            search,
            toggle,
            clear_filters,
            refresh,
        } => show_job(&mut app, id, search, toggle, clear_filters, refresh).await,
        Commands::Filter {
            job_id,
            toggle,
            clear,
        } => edit_filters(&app, job_id, toggle, clear),
        Commands::Resume { job_id, resume_id } => show_resume(&mut app, job_id, resume_id).await,
        Commands::NewJob => new_job(&mut app).await,
        Commands::Login { token } => login(&mut app, token).await,
        Commands::Logout => {
            let route = app.auth.logout().await;
            println!("Logged out.");
            navigate(&mut app, route).await
        }
        Commands::Whoami => {
            app.auth.fetch_user().await;
            match app.auth.user() {
                Some(user) => println!("{} ({})", user.email, user.id),
                None => println!("{SIGN_IN_HINT}"),
            }
            Ok(())
        }
    }
}

/// Follows a route handed back by a view.
async fn navigate(app: &mut App, route: Route) -> Result<()> {
    match route {
        Route::Root => {
            print!("{}", jobs_page(app, false).await);
            Ok(())
        }
        Route::NewJob => new_job(app).await,
        Route::Job(id) => show_job(app, id, String::new(), Vec::new(), false, false).await,
        Route::Resume { job_id, resume_id } => show_resume(app, job_id, resume_id).await,
    }
}

/// The jobs page, rendered once after loading (and refreshing, if asked).
async fn jobs_page(app: &mut App, refresh: bool) -> String {
    app.auth.fetch_user().await;
    let mut view = JobsView::new(app.backend.clone());
    view.load(&app.auth).await;
    if refresh {
        view.refresh(&app.auth).await;
    }
    let mut page = render::render_jobs_page(&app.auth, &view);
    if !app.auth.is_authenticated() {
        page.push_str(SIGN_IN_HINT);
        page.push('\n');
    }
    page
}

fn edit_filters(app: &App, job_id: i64, toggle: Vec<FilterField>, clear: bool) -> Result<()> {
    let mut filters = FilterStore::open(job_id, app.storage.clone());
    if clear {
        filters.clear().context("failed to save filters")?;
    }
    for field in toggle {
        filters.toggle(field).context("failed to save filters")?;
    }
    print!("{}", render::render_filter_menu(&filters.get()));
    Ok(())
}

async fn show_job(
    app: &mut App,
    id: i64,
    search: String,
    toggle: Vec<FilterField>,
    clear_filters: bool,
    refresh: bool,
) -> Result<()> {
    let mut view = JobDetailView::new(id, app.backend.clone(), app.storage.clone());
    if let Landing::Redirect(route) = view.mount(&mut app.auth).await {
        return Box::pin(navigate(app, route)).await;
    }

    if refresh {
        view.refresh().await;
    } else if clear_filters || !toggle.is_empty() {
        if clear_filters {
            view.clear_filters();
        }
        for field in toggle {
            view.toggle_filter(field);
        }
        view.apply_filter().await;
    }

    view.set_search(search);
    print!("{}", render::render_job_detail_page(&app.auth, &view));
    Ok(())
}

async fn show_resume(app: &mut App, job_id: i64, resume_id: i64) -> Result<()> {
    let mut view = ResumeDetailView::new(job_id, resume_id, app.backend.clone());
    if let Landing::Redirect(route) = view.mount(&mut app.auth).await {
        return Box::pin(navigate(app, route)).await;
    }
    print!("{}", render::render_resume_detail_page(&app.auth, &view));
    Ok(())
}

async fn login(app: &mut App, token: Option<String>) -> Result<()> {
    let Some(token) = token else {
        println!("Open this URL in a browser and sign in with Google:");
        println!("  {}", app.auth.login_url());
        println!("Then copy the `access_token` cookie and run:");
        println!("  prorank login --token <TOKEN>");
        return Ok(());
    };

    app.auth
        .login_with_token(&token)
        .with_context(|| format!("failed to save session in {}", app.config.data_dir.display()))?;
    if app.auth.fetch_user().await {
        let email = app.auth.user().map(|u| u.email.as_str()).unwrap_or_default();
        println!("Signed in as {email}.");
    } else {
        println!("The backend did not accept that token.");
    }
    Ok(())
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

/// Interactive three-step wizard on stdin.
async fn new_job(app: &mut App) -> Result<()> {
    let mut wizard = NewJobWizard::new(app.backend.clone(), app.config.drive_page_size);
    if let Landing::Redirect(route) = wizard.mount(&mut app.auth).await {
        println!("{SIGN_IN_HINT}");
        return Box::pin(navigate(app, route)).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", render::render_wizard_page(&app.auth, &wizard));

        let outcome = match wizard.step() {
            WizardStep::SelectFolder => {
                let Some(input) = prompt(&mut lines, "folder # / f / n / c / q > ").await? else {
                    return Ok(());
                };
                match input.trim() {
                    "q" => return Ok(()),
                    "f" => {
                        wizard.first_page().await;
                        Ok(())
                    }
                    "n" => {
                        wizard.next_page().await;
                        Ok(())
                    }
                    "c" => wizard.continue_to_name(),
                    other => match other.parse::<usize>() {
                        Ok(n) if n > 0 => wizard.select_listed(n - 1),
                        _ => {
                            println!("Unrecognised input '{other}'");
                            Ok(())
                        }
                    },
                }
            }
            WizardStep::NameJob => {
                let Some(input) =
                    prompt(&mut lines, "job name (blank line goes back) > ").await?
                else {
                    return Ok(());
                };
                if input.trim().is_empty() {
                    wizard.back()
                } else {
                    wizard
                        .set_job_name(input.trim())
                        .and_then(|_| wizard.continue_to_review())
                }
            }
            WizardStep::Review => {
                let Some(input) = prompt(&mut lines, "s / b / f / e / q > ").await? else {
                    return Ok(());
                };
                match input.trim() {
                    "q" => return Ok(()),
                    "b" => wizard.back(),
                    "f" => wizard.change_folder(),
                    "e" => wizard.edit_name(),
                    "s" => match wizard.submit().await {
                        Ok(route) => return Box::pin(navigate(app, route)).await,
                        Err(e) => Err(e),
                    },
                    other => {
                        println!("Unrecognised input '{other}'");
                        Ok(())
                    }
                }
            }
        };

        if let Err(e) = outcome {
            println!("{e}");
        }
    }
}
