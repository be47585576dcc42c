//! Shared state handed to every command handler.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::debug;
use vmpooler_api::{PoolerApi, PoolerClient};
use vmpooler_config::{ConfigStore, Prompter, TerminalPrompter, USERNAME};
use vmpooler_messages::{msg, MESSAGES};

/// Opens a service client for a configured vmpooler address.
pub type Connector = Box<dyn Fn(&str) -> Result<Box<dyn PoolerApi>>>;

/// Connector for the real service over HTTP.
pub fn http_connector() -> Connector {
    Box::new(|address: &str| {
        let client = PoolerClient::connect(address)?;
        Ok(Box::new(client) as Box<dyn PoolerApi>)
    })
}

/// The loaded configuration plus everything a handler needs to talk to the
/// user and the service.
pub struct Session {
    config: ConfigStore,
    prompter: Box<dyn Prompter>,
    connector: Connector,
    out: Box<dyn Write>,
}

impl Session {
    pub fn new(
        config: ConfigStore,
        prompter: Box<dyn Prompter>,
        connector: Connector,
        out: Box<dyn Write>,
    ) -> Self {
        Self {
            config,
            prompter,
            connector,
            out,
        }
    }

    /// Session on the terminal: prompts on the tty, output on stdout, HTTP
    /// to the service.
    pub fn terminal(config: ConfigStore) -> Self {
        Self::new(
            config,
            Box::new(TerminalPrompter),
            http_connector(),
            Box::new(io::stdout()),
        )
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// Write one line of command output.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", line.as_ref()).context("Failed to write output")
    }

    /// Write pre-rendered text as is.
    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .context("Failed to write output")
    }

    /// Client for the configured service, asking for its address first if
    /// none is configured.
    pub fn api(&mut self) -> Result<Box<dyn PoolerApi>> {
        let address = self.config.vmpooler_url(self.prompter.as_mut())?;
        debug!(address = %address, "connecting to vmpooler");
        (self.connector)(&address)
    }

    pub fn auth_token(&self) -> Result<String> {
        Ok(self.config.auth_token()?.to_string())
    }

    /// Ask for the user's credentials. The username is remembered in the
    /// configuration; the password never is.
    pub fn credentials(&mut self) -> Result<(String, String)> {
        self.say(MESSAGES.config.credentials_header)?;

        let username = match self.config.get(USERNAME) {
            Some(username) => {
                let username = username.to_string();
                self.say(msg!(MESSAGES.config.using_username, username = &username))?;
                username
            }
            None => self.config.request_value(
                self.prompter.as_mut(),
                USERNAME,
                MESSAGES.config.username_prompt,
            )?,
        };
        let password = self.prompter.password(MESSAGES.config.password_prompt)?;
        Ok((username, password))
    }

    pub fn save(&self) -> Result<()> {
        self.config.save()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Failed to write output")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fakes for exercising handlers without a terminal or a service.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::{self, Write};
    use std::rc::Rc;

    use tempfile::TempDir;
    use vmpooler_api::error::Result as ApiResult;
    use vmpooler_api::{ApiError, PoolerApi, TokenInfo, VmInfo};
    use vmpooler_config::{ConfigStore, Prompter};
    use vmpooler_core::{PoolerError, Result as CoreResult};

    use super::Session;

    /// Output sink that can be read back after the session is gone.
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub answers: VecDeque<String>,
        pub asked: Rc<RefCell<Vec<String>>>,
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, prompt: &str) -> CoreResult<String> {
            self.asked.borrow_mut().push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| PoolerError::Prompt(format!("unexpected prompt {prompt}")))
        }

        fn password(&mut self, prompt: &str) -> CoreResult<String> {
            self.input(prompt)
        }
    }

    /// Service double backed by fixed data. Every call is logged.
    #[derive(Default)]
    pub struct FakePool {
        pub templates: Vec<String>,
        pub vms: Vec<(String, VmInfo)>,
        pub running: Vec<String>,
        pub issued_token: String,
        pub calls: RefCell<Vec<String>>,
        pub fail_with: Option<ApiError>,
    }

    impl FakePool {
        fn record(&self, call: String) -> ApiResult<()> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    /// The handle a connector hands out; all handles share one [`FakePool`].
    pub struct PoolHandle(pub Rc<FakePool>);

    impl PoolerApi for PoolHandle {
        fn create_token(&self, username: &str, password: &str) -> ApiResult<String> {
            self.0.record(format!("create_token {username} {password}"))?;
            Ok(self.0.issued_token.clone())
        }

        fn token_info(&self, token: &str) -> ApiResult<TokenInfo> {
            self.0.record(format!("token_info {token}"))?;
            let running: Vec<serde_json::Value> =
                self.0.running.iter().map(|h| h.as_str().into()).collect();
            Ok(serde_json::from_value(serde_json::json!({
                "user": "jdoe",
                "vms": { "running": running }
            }))?)
        }

        fn revoke_token(&self, username: &str, _password: &str, token: &str) -> ApiResult<()> {
            self.0.record(format!("revoke_token {username} {token}"))
        }

        fn list_templates(&self, auth_token: &str) -> ApiResult<Vec<String>> {
            self.0.record(format!("list_templates {auth_token}"))?;
            Ok(self.0.templates.clone())
        }

        fn acquire_vm(&self, template: &str, auth_token: &str) -> ApiResult<String> {
            self.0.record(format!("acquire_vm {template} {auth_token}"))?;
            Ok(format!("{template}-host"))
        }

        fn vm_info(&self, hostname: &str, auth_token: &str) -> ApiResult<VmInfo> {
            self.0.record(format!("vm_info {hostname} {auth_token}"))?;
            self.0.vms
                .iter()
                .find(|(name, _)| name == hostname)
                .map(|(_, info)| info.clone())
                .ok_or(ApiError::Rejected(
                    "Could not find VM! Check the VM name and try again!",
                ))
        }

        fn destroy_vm(&self, hostname: &str, auth_token: &str) -> ApiResult<()> {
            self.0.record(format!("destroy_vm {hostname} {auth_token}"))
        }

        fn set_lifetime(&self, hostname: &str, hours: u32, auth_token: &str) -> ApiResult<()> {
            self.0.record(format!("set_lifetime {hostname} {hours} {auth_token}"))
        }
    }

    /// A session over a temporary configuration file.
    pub struct Harness {
        pub session: Session,
        pub output: SharedBuffer,
        pub pool: Rc<FakePool>,
        pub asked: Rc<RefCell<Vec<String>>>,
        pub connected_to: Rc<RefCell<Vec<String>>>,
        _dir: TempDir,
    }

    impl Harness {
        pub fn new(config: &[(&str, &str)], answers: &[&str], pool: FakePool) -> Self {
            let dir = TempDir::new().expect("temp dir");
            let mut store = ConfigStore::load(dir.path().join(".vmpooler.conf")).expect("config");
            for (key, value) in config {
                store.set(*key, *value);
            }

            let output = SharedBuffer::default();
            let pool = Rc::new(pool);
            let prompter = ScriptedPrompter {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            };
            let asked = prompter.asked.clone();
            let connected_to = Rc::new(RefCell::new(Vec::new()));

            let connector_pool = pool.clone();
            let connector_log = connected_to.clone();
            let session = Session::new(
                store,
                Box::new(prompter),
                Box::new(move |address: &str| {
                    connector_log.borrow_mut().push(address.to_string());
                    Ok(Box::new(PoolHandle(connector_pool.clone())) as Box<dyn PoolerApi>)
                }),
                Box::new(output.clone()),
            );

            Self {
                session,
                output,
                pool,
                asked,
                connected_to,
                _dir: dir,
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.pool.calls.borrow().clone()
        }
    }

    pub fn vm(template: &str, running: f64, lifetime: u32) -> VmInfo {
        serde_json::from_value(serde_json::json!({
            "template": template,
            "running": running,
            "lifetime": lifetime,
        }))
        .expect("vm info")
    }
}
