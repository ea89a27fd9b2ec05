//! Scripted fakes for driving the orchestrator without a browser.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use rewards_login::{
    Cookie, FlowConfig, PagePort, PortError, PromptPort, SessionSink, TotpProvider, WaitPolicy,
};

/// One rendered sign-in screen: what is visible, what text elements
/// carry, and which click advances the script to the next screen.
#[derive(Clone, Default)]
pub struct Screen {
    pub url: String,
    pub visible: Vec<&'static str>,
    pub texts: Vec<(&'static str, &'static str)>,
    pub markup: String,
    pub advance_on_click: Vec<&'static str>,
}

impl Screen {
    pub fn at(url: &str) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_visible(mut self, selectors: &[&'static str]) -> Self {
        self.visible = selectors.to_vec();
        self
    }

    pub fn with_text(mut self, selector: &'static str, text: &'static str) -> Self {
        self.texts.push((selector, text));
        self
    }

    pub fn with_markup(mut self, markup: &str) -> Self {
        self.markup = markup.into();
        self
    }

    pub fn advance_on(mut self, selectors: &[&'static str]) -> Self {
        self.advance_on_click = selectors.to_vec();
        self
    }
}

struct PageModel {
    current: Screen,
    queue: VecDeque<Screen>,
    closed: bool,
    reloads: u32,
    clicks: Vec<String>,
    fills: Vec<(String, String)>,
}

pub struct FakePage {
    model: Mutex<PageModel>,
}

impl FakePage {
    pub fn new(mut screens: Vec<Screen>) -> Self {
        assert!(!screens.is_empty(), "a fake page needs at least one screen");
        let current = screens.remove(0);
        Self {
            model: Mutex::new(PageModel {
                current,
                queue: screens.into(),
                closed: false,
                reloads: 0,
                clicks: Vec::new(),
                fills: Vec::new(),
            }),
        }
    }

    pub fn closed(screens: Vec<Screen>) -> Self {
        let page = Self::new(screens);
        page.model.lock().closed = true;
        page
    }

    pub fn reload_count(&self) -> u32 {
        self.model.lock().reloads
    }

    pub fn clicks(&self) -> Vec<String> {
        self.model.lock().clicks.clone()
    }

    pub fn fills(&self) -> Vec<(String, String)> {
        self.model.lock().fills.clone()
    }
}

#[async_trait]
impl PagePort for FakePage {
    async fn navigate(&self, url: &str, _wait: WaitPolicy) -> Result<(), PortError> {
        self.model.lock().current.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String, PortError> {
        Ok(self.model.lock().current.url.clone())
    }

    fn is_closed(&self) -> bool {
        self.model.lock().closed
    }

    async fn probe_visible(&self, selector: &str, _timeout_ms: u64) -> Result<bool, PortError> {
        Ok(self.model.lock().current.visible.iter().any(|s| *s == selector))
    }

    async fn click(&self, selector: &str, _timeout_ms: u64) -> Result<(), PortError> {
        let mut model = self.model.lock();
        model.clicks.push(selector.to_string());
        let advances = model
            .current
            .advance_on_click
            .iter()
            .any(|s| *s == selector);
        if advances {
            if let Some(next) = model.queue.pop_front() {
                model.current = next;
            }
        }
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), PortError> {
        self.model
            .lock()
            .fills
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn press_key(&self, _key: &str) -> Result<(), PortError> {
        Ok(())
    }

    async fn text_of(
        &self,
        selector: &str,
        _timeout_ms: u64,
    ) -> Result<Option<String>, PortError> {
        Ok(self
            .model
            .lock()
            .current
            .texts
            .iter()
            .find(|(s, _)| *s == selector)
            .map(|(_, t)| t.to_string()))
    }

    async fn content(&self) -> Result<String, PortError> {
        Ok(self.model.lock().current.markup.clone())
    }

    async fn wait_for_quiescence(&self, _timeout_ms: u64) -> Result<(), PortError> {
        Ok(())
    }

    async fn reload(&self) -> Result<(), PortError> {
        self.model.lock().reloads += 1;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<Cookie>, PortError> {
        Ok(vec![
            Cookie {
                name: "MSPAuth".into(),
                value: "auth-token".into(),
                domain: ".live.com".into(),
                path: "/".into(),
                expires: None,
                http_only: true,
                secure: true,
            },
            Cookie {
                name: "_RwBf".into(),
                value: "rewards".into(),
                domain: ".bing.com".into(),
                path: "/".into(),
                expires: Some(2_000_000_000.0),
                http_only: false,
                secure: true,
            },
        ])
    }
}

/// Queue-backed operator prompt; an empty queue means every prompt
/// times out.
#[derive(Default)]
pub struct FakePrompt {
    answers: Mutex<VecDeque<Option<String>>>,
}

impl FakePrompt {
    pub fn with_answers(answers: Vec<Option<&str>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| a.map(String::from)).collect()),
        }
    }
}

#[async_trait]
impl PromptPort for FakePrompt {
    async fn prompt_line(&self, _question: &str, _timeout_secs: u64) -> Option<String> {
        self.answers.lock().pop_front().flatten()
    }
}

pub struct FixedTotp(pub &'static str);

impl TotpProvider for FixedTotp {
    fn code(&self, _secret: &str) -> String {
        self.0.to_string()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub stores: Mutex<Vec<(PathBuf, usize, String, bool)>>,
}

#[async_trait]
impl SessionSink for RecordingSink {
    async fn store(
        &self,
        session_hint: &Path,
        cookies: &[Cookie],
        account_email: &str,
        is_mobile: bool,
    ) -> Result<(), PortError> {
        self.stores.lock().push((
            session_hint.to_path_buf(),
            cookies.len(),
            account_email.to_string(),
            is_mobile,
        ));
        Ok(())
    }
}

/// Default config with every delay collapsed so tests run in
/// milliseconds while keeping the documented budgets.
pub fn fast_config() -> FlowConfig {
    FlowConfig {
        probe_timeout_ms: 1,
        settle_delay_ms: 1,
        quiescence_timeout_ms: 1,
        click_timeout_ms: 1,
        prompt_timeout_secs: 1,
        passwordless_poll_interval_ms: 1,
        finalize_retry_delay_ms: 1,
        ..FlowConfig::default()
    }
}
