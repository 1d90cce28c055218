/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 18/10/26
 ******************************************************************************/
use account_reload::config::Config;
use account_reload::presentation::serialization::Serializer;
use account_reload::session::interface::{ClientReloader, LiveClient};
use account_reload::utils::logger::setup_logger;
use account_reload::{
    Account, AdapterRegistry, Handle, Izly, LocalAccount, ReloadDispatcher, ReloadError,
    ReloadResult, ReloadService, Session,
};
use async_trait::async_trait;

#[derive(Debug)]
struct DemoIzlyClient;

impl LiveClient for DemoIzlyClient {
    fn describe(&self) -> String {
        "demo izly client".to_string()
    }
}

struct DemoIzlyAdapter;

#[async_trait]
impl ClientReloader<Izly> for DemoIzlyAdapter {
    async fn reload(&self, _account: &Session<Izly>) -> ReloadResult<Handle<Izly>> {
        // A real adapter would log in against the provider here.
        Ok(Handle::new(DemoIzlyClient))
    }
}

#[tokio::main]
async fn main() -> Result<(), ReloadError> {
    // Initialize the logger
    setup_logger();

    // Load the configuration
    let config = Config::new();
    println!("Configuration: {}", config);

    let registry = AdapterRegistry::builder()
        .config(&config)
        .izly(|| async { Ok::<_, ReloadError>(DemoIzlyAdapter) })
        .build();
    let dispatcher = ReloadDispatcher::new(registry);

    let mut accounts = vec![
        Account::Izly(Serializer::restore_session(r#"{"secret":"demo","session":{"id":1}}"#)?),
        Account::Local(LocalAccount::default()),
        Account::Unrecognized {
            service: "appscho".to_string(),
        },
    ];

    let results = dispatcher.reload_all(&accounts).await;
    for (account, result) in accounts.iter_mut().zip(results) {
        match result {
            Ok(reconnection) => {
                match reconnection.authentication_json()? {
                    Some(authentication) => println!(
                        "{} reloaded, credential to persist: {}",
                        account,
                        Serializer::to_json(&authentication)?
                    ),
                    None => println!("{} has nothing to persist", account),
                }
                account.apply(reconnection)?;
            }
            Err(e) => eprintln!("{} reload error: {}", account, e),
        }
    }

    Ok(())
}
