//! Account selection after login.

use crate::api::LoginAccount;
use crate::error::{SigningError, SigningResult};

/// Pick the account to act on.
///
/// With `preferred` set, the account must be among those returned (matched by
/// id or GUID). Without it the first returned account wins.
pub fn select_account<'a>(
    accounts: &'a [LoginAccount],
    preferred: Option<&str>,
) -> SigningResult<&'a LoginAccount> {
    if accounts.is_empty() {
        return Err(SigningError::Auth("login returned no accounts".into()));
    }

    match preferred {
        Some(wanted) => accounts
            .iter()
            .find(|a| {
                a.account_id == wanted
                    || a.account_id_guid
                        .as_deref()
                        .is_some_and(|g| g.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| {
                SigningError::Auth(format!(
                    "account {} is not available to this user ({} accounts returned)",
                    wanted,
                    accounts.len()
                ))
            }),
        None => {
            let first = &accounts[0];
            if accounts.len() > 1 {
                tracing::warn!(
                    account_count = accounts.len(),
                    selected = %first.account_id,
                    "User belongs to several accounts; using the first. Set signing.account_id to choose"
                );
            }
            Ok(first)
        }
    }
}
