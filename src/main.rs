use std::sync::Arc;

use pawfect_care::{
    domain::{RecordStore, SessionContext},
    infrastructure::{
        database::mongo_context::MongoContext,
        mongodb::{record_store::MongoRecordStore, session_context::MongoSessionContext},
        seed::seed_sample_records,
    },
    screens::{FormOutcome, HomeScreen, HomeTab, LoginForm, SignupForm},
    utils::{config::AppConfig, logging},
};

const USAGE: &str = "usage:
  pawfect_care login <email> <password>
  pawfect_care signup <email> <password> <confirm-password>
  pawfect_care seed <email> <password>";

fn report(outcome: &FormOutcome) -> bool {
    if let Some(notification) = outcome.notification() {
        println!("{}", notification.message);
    }
    outcome.is_success()
}

async fn show_home(session: Arc<dyn SessionContext>, store: Arc<dyn RecordStore>) {
    let mut home = HomeScreen::new(session, store);
    home.open();

    for tab in [HomeTab::Pets, HomeTab::Owners] {
        home.select_tab(tab);
        if let Some(view) = home.settled_view().await {
            println!("\n[{}] {}\n{}", tab.label(), home.title(), view);
        }
    }
    home.close();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match AppConfig::global() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    logging::init(&config.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let mongo_context = match MongoContext::init(&config.database_url, &config.database_name).await {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let session: Arc<dyn SessionContext> = match MongoSessionContext::init(
        &mongo_context,
        &config.secret_key,
        config.token_ttl_minutes,
    ).await {
        Ok(session) => Arc::new(session),
        Err(e) => {
            log::error!("Failed to prepare accounts collection: {}", e);
            std::process::exit(1);
        }
    };
    let store: Arc<dyn RecordStore> = Arc::new(MongoRecordStore::new(&mongo_context));

    match args.as_slice() {
        ["login", email, password] => {
            let form = LoginForm::new(Arc::clone(&session));
            if report(&form.submit(email, password).await) {
                show_home(session, store).await;
            }
        },
        ["signup", email, password, confirm] => {
            let form = SignupForm::new(Arc::clone(&session));
            report(&form.submit(email, password, confirm).await);
        },
        ["seed", email, password] => {
            let form = LoginForm::new(Arc::clone(&session));
            if !report(&form.submit(email, password).await) {
                std::process::exit(1);
            }
            let Some(user) = session.current_user() else {
                std::process::exit(1);
            };
            match seed_sample_records(store.as_ref(), &user.uid).await {
                Ok(seeded) => println!("Seeded {} pets and {} contacts", seeded.pets, seeded.owners),
                Err(e) => {
                    log::error!("Seeding failed: {}", e);
                    std::process::exit(1);
                }
            }
        },
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}
