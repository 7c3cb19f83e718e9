use procfs::process::Process;
use sysinfo::{Uid, Users};
use tracing::debug;

const LOGIN_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// True when the process runs with an effective uid of 0.
pub fn is_elevated() -> bool {
    match Process::myself().and_then(|me| me.status()) {
        Ok(status) => status.euid == 0,
        Err(e) => {
            debug!(error = %e, "could not read /proc/self/status");
            false
        }
    }
}

/// Login name: the first non-empty login variable, else the account of the real uid.
pub fn current_login() -> String {
    resolve_login(|key| std::env::var(key).ok(), real_user_name)
}

fn resolve_login<E, L>(env: E, lookup: L) -> String
where
    E: Fn(&str) -> Option<String>,
    L: FnOnce() -> Option<String>,
{
    LOGIN_VARS
        .iter()
        .filter_map(|key| env(key))
        .find(|value| !value.is_empty())
        .or_else(lookup)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Account name of the real uid, from the user database.
pub fn real_user_name() -> Option<String> {
    let ruid = match Process::myself().and_then(|me| me.status()) {
        Ok(status) => status.ruid,
        Err(e) => {
            debug!(error = %e, "could not read /proc/self/status");
            return None;
        }
    };

    let uid = Uid::try_from(ruid as usize).ok()?;
    let users = Users::new_with_refreshed_list();
    let name = users.get_user_by_id(&uid).map(|user| user.name().to_string());
    if name.is_none() {
        debug!(uid = ruid, "uid has no user database entry");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_variables_take_precedence() {
        let env = |key: &str| match key {
            "LOGNAME" => Some(String::new()),
            "USER" => Some("ops".to_string()),
            _ => None,
        };
        assert_eq!(resolve_login(env, || Some("root".to_string())), "ops");
    }

    #[test]
    fn test_falls_back_to_real_uid_account() {
        let no_env = |_: &str| None;
        let login = resolve_login(no_env, real_user_name);

        let status = Process::myself().unwrap().status().unwrap();
        match real_user_name() {
            Some(name) => assert_eq!(login, name),
            None => assert_eq!(login, "unknown"),
        }
        if status.ruid == 0 {
            assert_eq!(login, "root");
        }
    }

    #[test]
    fn test_unknown_without_env_or_account() {
        assert_eq!(resolve_login(|_| None, || None), "unknown");
    }
}
