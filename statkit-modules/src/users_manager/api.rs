//! Users manager adapter.

use statkit_core::{Params, SiteSelector};
use statkit_fetch::RequestSink;

use super::types::{AccessLevel, UserFilter, UserUpdate};
use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `UsersManager` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "UsersManager",
    cli_name: "users",
    aliases: &["users-manager"],
    summary: "Users, per-site access and superuser rights",
    methods: &[
        "getUsers",
        "getUsersLogin",
        "getUser",
        "getUserByEmail",
        "getUsersPlusRole",
        "addUser",
        "updateUser",
        "deleteUser",
        "userExists",
        "userEmailExists",
        "setUserAccess",
        "getSitesAccessFromUser",
        "getUsersAccessFromSite",
        "getUsersWithSiteAccess",
        "setSuperUserAccess",
        "hasSuperUserAccess",
        "createAppSpecificTokenAuth",
    ],
};

/// Adapter for the `UsersManager` namespace.
#[derive(Debug, Clone)]
pub struct UsersManager<S> {
    sink: S,
}

impl<S: RequestSink> UsersManager<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Users by login; every user when `logins` is empty.
    pub async fn get_users(&self, logins: &[&str]) -> S::Output {
        let params = Params::new().with_opt("userLogins", (!logins.is_empty()).then_some(logins));
        self.sink.send("UsersManager.getUsers", params).await
    }

    bare_methods! {
        /// Every login.
        get_users_login => "UsersManager.getUsersLogin";
        /// Whether the caller is a superuser.
        has_super_user_access => "UsersManager.hasSuperUserAccess";
    }

    /// One user.
    pub async fn get_user(&self, login: &str) -> S::Output {
        self.by_login("UsersManager.getUser", login).await
    }

    /// One user, looked up by email.
    pub async fn get_user_by_email(&self, email: &str) -> S::Output {
        self.sink
            .send(
                "UsersManager.getUserByEmail",
                Params::new().with("userEmail", email),
            )
            .await
    }

    /// Users with their role on a site.
    pub async fn get_users_plus_role(&self, filter: &UserFilter) -> S::Output {
        self.sink
            .send("UsersManager.getUsersPlusRole", filter.to_params())
            .await
    }

    /// Creates a user.
    pub async fn add_user(
        &self,
        login: &str,
        password: &str,
        email: &str,
        initial_site: Option<u32>,
    ) -> S::Output {
        let params = Params::new()
            .with("userLogin", login)
            .with("password", password)
            .with("email", email)
            .with_opt("initialIdSite", initial_site);
        self.sink.send("UsersManager.addUser", params).await
    }

    /// Changes a user's password or email.
    pub async fn update_user(&self, login: &str, update: &UserUpdate) -> S::Output {
        let mut params = Params::new().with("userLogin", login);
        params.extend(update.to_params());
        self.sink.send("UsersManager.updateUser", params).await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, login: &str) -> S::Output {
        self.by_login("UsersManager.deleteUser", login).await
    }

    /// Whether a login is taken.
    pub async fn user_exists(&self, login: &str) -> S::Output {
        self.by_login("UsersManager.userExists", login).await
    }

    /// Whether an email address is taken.
    pub async fn user_email_exists(&self, email: &str) -> S::Output {
        self.sink
            .send(
                "UsersManager.userEmailExists",
                Params::new().with("userEmail", email),
            )
            .await
    }

    /// Grants `access` on `sites`.
    pub async fn set_user_access(
        &self,
        login: &str,
        access: AccessLevel,
        sites: &SiteSelector,
        password_confirmation: Option<&str>,
    ) -> S::Output {
        let params = Params::new()
            .with("userLogin", login)
            .with("access", access)
            .with("idSites", sites.clone())
            .with_opt("passwordConfirmation", password_confirmation);
        self.sink.send("UsersManager.setUserAccess", params).await
    }

    /// Sites a user can access, with the level.
    pub async fn get_sites_access_from_user(&self, login: &str) -> S::Output {
        self.by_login("UsersManager.getSitesAccessFromUser", login)
            .await
    }

    /// Users with access to a site, with the level.
    pub async fn get_users_access_from_site(&self, site: u32) -> S::Output {
        self.sink
            .send(
                "UsersManager.getUsersAccessFromSite",
                Params::new().with("idSite", site),
            )
            .await
    }

    /// Users with any access to a site.
    pub async fn get_users_with_site_access(&self, site: u32, access: AccessLevel) -> S::Output {
        let params = Params::new().with("idSite", site).with("access", access);
        self.sink
            .send("UsersManager.getUsersWithSiteAccess", params)
            .await
    }

    /// Grants or revokes superuser rights.
    pub async fn set_super_user_access(
        &self,
        login: &str,
        has_access: bool,
        password_confirmation: &str,
    ) -> S::Output {
        let params = Params::new()
            .with("userLogin", login)
            .with("hasSuperUserAccess", has_access)
            .with("passwordConfirmation", password_confirmation);
        self.sink.send("UsersManager.setSuperUserAccess", params).await
    }

    /// Creates an API token for a user.
    pub async fn create_app_specific_token_auth(
        &self,
        login: &str,
        password_confirmation: &str,
        description: &str,
    ) -> S::Output {
        let params = Params::new()
            .with("userLogin", login)
            .with("passwordConfirmation", password_confirmation)
            .with("description", description);
        self.sink
            .send("UsersManager.createAppSpecificTokenAuth", params)
            .await
    }

    async fn by_login(&self, method: &str, login: &str) -> S::Output {
        self.sink
            .send(method, Params::new().with("userLogin", login))
            .await
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::{ParamValue, PendingCall};

    use super::*;
    use crate::testing::{EchoSink, scalars};

    #[tokio::test]
    async fn test_get_users_all() {
        let call = UsersManager::new(EchoSink).get_users(&[]).await;
        assert_eq!(call, PendingCall::bare("UsersManager.getUsers"));
    }

    #[tokio::test]
    async fn test_get_users_by_login() {
        let call = UsersManager::new(EchoSink)
            .get_users(&["alice", "bob"])
            .await;
        assert_eq!(
            call.params().get("userLogins"),
            Some(&ParamValue::List(vec!["alice".into(), "bob".into()]))
        );
    }

    #[tokio::test]
    async fn test_set_user_access_many_sites() {
        let call = UsersManager::new(EchoSink)
            .set_user_access(
                "alice",
                AccessLevel::Write,
                &SiteSelector::Many(vec![1, 4]),
                None,
            )
            .await;

        assert_eq!(call.method(), "UsersManager.setUserAccess");
        assert_eq!(
            call.params().get("idSites"),
            Some(&ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(4)]))
        );
        assert_eq!(call.params().get("access"), Some(&ParamValue::Str("write".into())));
        assert!(!call.params().contains_key("passwordConfirmation"));
    }

    #[tokio::test]
    async fn test_update_user() {
        let update = UserUpdate {
            email: Some("alice@example.com".to_string()),
            ..UserUpdate::default()
        };
        let call = UsersManager::new(EchoSink).update_user("alice", &update).await;

        assert_eq!(
            scalars(&call),
            vec![
                ("userLogin".to_string(), "alice".to_string()),
                ("email".to_string(), "alice@example.com".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_super_user_flag_renders_as_digit() {
        let call = UsersManager::new(EchoSink)
            .set_super_user_access("alice", false, "secret")
            .await;
        assert!(scalars(&call).contains(&("hasSuperUserAccess".to_string(), "0".to_string())));
    }
}
