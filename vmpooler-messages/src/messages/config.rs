//! Configuration and credential messages (set, get, unset, prompts).

pub struct ConfigMessages {
    pub set_value: &'static str,
    pub not_set: &'static str,
    pub unset_missing: &'static str,
    pub url_prompt: &'static str,
    pub credentials_header: &'static str,
    pub username_prompt: &'static str,
    pub using_username: &'static str,
    pub password_prompt: &'static str,
    pub no_auth_token: &'static str,
}

pub const CONFIG_MESSAGES: ConfigMessages = ConfigMessages {
    set_value: "{key}: {value}",
    not_set: "Config option \"{key}\" is not set",
    unset_missing: "The setting \"{key}\" was not found in the configuration file!",
    url_prompt: "Please enter the URL of the vmpooler. This will only be requested once",
    credentials_header: "Please provide LDAP credentials for the VM pooler\n",
    username_prompt: "Username",
    using_username: "Using username: {username}",
    password_prompt: "Password",
    no_auth_token: "Error: No authentication token found!\n\nRun the \"token create\" subcommand or manually update the\nconfiguration file with a valid authorization token using\n\"vmpooler config set auth_token AUTH_TOKEN\"",
};
