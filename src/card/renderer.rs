use anyhow::{Context, Result, anyhow};
use base64::{Engine as _, engine::general_purpose};
use headless_chrome::Tab;
use headless_chrome::{Browser, LaunchOptions, protocol::cdp::Page};
use parking_lot::Mutex;
use std::ffi::OsStr;
use std::sync::Arc;

use crate::card::request::FileType;

const JPEG_QUALITY: u32 = 90;

struct TabGuard {
    tab: Arc<Tab>,
}

impl TabGuard {
    fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    fn as_ref(&self) -> &Arc<Tab> {
        &self.tab
    }
}

impl Drop for TabGuard {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(true) {
            tracing::warn!("Failed to close tab during cleanup: {}", e);
        } else {
            tracing::debug!("Tab closed successfully");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 1170,
        }
    }
}

/// Screenshots card HTML with a shared headless Chrome instance.
///
/// The browser is started on first use and replaced when it stops answering.
#[derive(Clone)]
pub struct RenderingEngine {
    browser: Arc<Mutex<Option<Browser>>>,
    launch_options: LaunchOptions<'static>,
    viewport: Viewport,
}

impl RenderingEngine {
    pub fn new(viewport: Viewport) -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((viewport.width, viewport.height)))
            .args(vec![
                OsStr::new("--no-sandbox"),
                OsStr::new("--disable-setuid-sandbox"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-software-rasterizer"),
                OsStr::new("--disable-extensions"),
                OsStr::new("--disable-background-networking"),
                OsStr::new("--disable-sync"),
                OsStr::new("--metrics-recording-only"),
                OsStr::new("--mute-audio"),
                OsStr::new("--no-first-run"),
                OsStr::new("--disable-default-apps"),
            ])
            .build()
            .map_err(|e| anyhow!("Invalid browser launch options: {}", e))?;

        Ok(Self {
            browser: Arc::new(Mutex::new(None)),
            launch_options,
            viewport,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Start the browser ahead of the first request.
    pub fn warm_up(&self) -> Result<()> {
        self.get_or_create_browser().map(|_| ())
    }

    pub fn is_browser_running(&self) -> bool {
        self.browser.lock().is_some()
    }

    fn get_or_create_browser(&self) -> Result<Browser> {
        let mut browser_lock = self.browser.lock();

        if let Some(ref browser) = *browser_lock {
            match browser.new_tab() {
                Ok(tab) => {
                    let _ = tab.close(true);
                    return Ok(browser.clone());
                }
                Err(_) => {
                    tracing::warn!("Browser health check failed, recreating");
                    *browser_lock = None;
                }
            }
        }

        tracing::info!("Launching headless browser");
        let new_browser = Browser::new(self.launch_options.clone())
            .context("Could not launch Chrome/Chromium")?;
        *browser_lock = Some(new_browser.clone());

        Ok(new_browser)
    }

    pub async fn screenshot(&self, html: String, file_type: FileType) -> Result<Vec<u8>> {
        let engine = self.clone();

        tokio::task::spawn_blocking(move || engine.screenshot_sync(&html, file_type))
            .await
            .map_err(|e| anyhow!("Task join error: {}", e))?
    }

    fn screenshot_sync(&self, html: &str, file_type: FileType) -> Result<Vec<u8>> {
        let browser = self.get_or_create_browser().or_else(|e| {
            tracing::warn!("First browser creation failed: {}, retrying...", e);
            *self.browser.lock() = None;
            self.get_or_create_browser()
        })?;
        let tab = browser.new_tab()?;
        let tab_guard = TabGuard::new(tab);
        let tab = tab_guard.as_ref();

        tab.set_bounds(headless_chrome::types::Bounds::Normal {
            left: Some(0),
            top: Some(0),
            width: Some(self.viewport.width as f64),
            height: Some(self.viewport.height as f64),
        })?;

        let data_url = format!(
            "data:text/html;base64,{}",
            general_purpose::STANDARD.encode(html)
        );
        tab.navigate_to(&data_url)?.wait_until_navigated()?;

        let bytes = match file_type {
            FileType::Png => tab.capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                None,
                true,
            )?,
            FileType::Jpeg => tab.capture_screenshot(
                Page::CaptureScreenshotFormatOption::Jpeg,
                Some(JPEG_QUALITY),
                None,
                true,
            )?,
        };

        tracing::debug!("Captured {} screenshot, {} bytes", file_type.as_str(), bytes.len());
        Ok(bytes)
    }
}
