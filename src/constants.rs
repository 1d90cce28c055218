/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

pub(crate) const LOG_LEVEL_ENV_KEY: &str = "RELOAD_LOG_LEVEL";
pub(crate) const ENABLED_SERVICES_ENV_KEY: &str = "RELOAD_ENABLED_SERVICES";

pub(crate) const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Field the ARD arm adds to the stored credential after a reload.
pub const BALANCES_FIELD: &str = "balances";
