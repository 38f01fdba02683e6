//! Chat widget loading and control.
//!
//! ARCHITECTURE
//! ============
//! The vendor script is attached through a [`LoaderCell`] so repeated mounts
//! of the launcher never duplicate the script tag. Once loaded, the widget
//! exposes one of three global API generations depending on which script
//! build the CDN served; [`toggle_with`] walks an ordered probe list
//! (primary object, then widget API, then legacy function) and stops at the
//! first probe that handles the action, no-op-ing silently when none do.

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use crate::util::loader::{LoaderCell, load_once};

#[cfg(feature = "hydrate")]
const SCRIPT_ELEMENT_ID: &str = "mainstreet-chat-widget";

/// Script URL for a configured widget id.
#[must_use]
pub fn widget_script_url(widget_id: &str) -> String {
    format!("https://widget.chatlet.io/loader/{widget_id}.js")
}

/// The widget id configured for this deployment, if any.
///
/// The host page sets `window.__CHAT_WIDGET_ID` from its deploy config; a
/// missing id disables the widget without affecting the rest of the page.
#[must_use]
pub fn configured_widget_id() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &"__CHAT_WIDGET_ID".into())
            .ok()
            .and_then(|value| value.as_string())
            .filter(|id| !id.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Wrapper around a dedicated loader cell for the chat widget, shared via
/// context so every launcher mount joins the same attempt.
#[derive(Clone, Default)]
pub struct ChatLoader(pub LoaderCell);

impl ChatLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Attach the vendor script at most once.
///
/// # Errors
///
/// Returns an error string when no widget id is configured or the script
/// fails to load; the loader stays retryable in the latter case.
pub async fn ensure_widget(loader: &ChatLoader) -> Result<(), String> {
    let Some(widget_id) = configured_widget_id() else {
        #[cfg(feature = "hydrate")]
        log::warn!("no chat widget id configured, widget disabled");
        return Err("chat widget not configured".to_owned());
    };
    let url = widget_script_url(&widget_id);
    load_once(&loader.0, || inject_script(url)).await
}

/// Insert a `<script>` tag for `src` and await its load outcome.
#[allow(clippy::unused_async)]
async fn inject_script(src: String) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use futures::channel::oneshot;
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let head = document.head().ok_or_else(|| "no document head".to_owned())?;

        let script: web_sys::HtmlScriptElement = document
            .create_element("script")
            .map_err(|_| "failed to create script element".to_owned())?
            .unchecked_into();
        script.set_id(SCRIPT_ELEMENT_ID);
        script.set_src(&src);
        script.set_async(true);

        let (loaded_tx, loaded_rx) = oneshot::channel::<Result<(), String>>();
        let (tx_ok, tx_err) = {
            let shared = std::rc::Rc::new(std::cell::RefCell::new(Some(loaded_tx)));
            (std::rc::Rc::clone(&shared), shared)
        };

        let on_load = Closure::<dyn Fn()>::new(move || {
            if let Some(tx) = tx_ok.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        });
        let on_error = Closure::<dyn Fn()>::new(move || {
            if let Some(tx) = tx_err.borrow_mut().take() {
                let _ = tx.send(Err("chat widget script failed to load".to_owned()));
            }
        });
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();

        head.append_child(&script)
            .map_err(|_| "failed to append script element".to_owned())?;

        loaded_rx
            .await
            .unwrap_or_else(|_| Err("chat widget script never settled".to_owned()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = src;
        Err("not available on server".to_owned())
    }
}

/// One generation of the widget's global control surface.
pub trait WidgetProbe {
    /// Attempt to toggle the chat panel. Returns whether this probe handled it.
    fn try_toggle(&self) -> bool;
}

/// Walk `probes` in order, stopping at the first that handles the toggle.
///
/// Returns whether any probe succeeded. The order is fixed to match the
/// vendor's documented precedence: primary, then widget API, then legacy.
pub fn toggle_with(probes: &[&dyn WidgetProbe]) -> bool {
    probes.iter().any(|probe| probe.try_toggle())
}

/// Toggle the live widget through whichever global API generation is present.
pub fn toggle_panel() {
    #[cfg(feature = "hydrate")]
    {
        let handled = toggle_with(&[
            &globals::PrimaryApi,
            &globals::WidgetApi,
            &globals::LegacyApi,
        ]);
        if !handled {
            log::warn!("chat widget loaded but no known API surface found");
        }
    }
}

#[cfg(feature = "hydrate")]
mod globals {
    //! Probes over the three known generations of the vendor's globals.

    use wasm_bindgen::{JsCast, JsValue};

    use super::WidgetProbe;

    fn call_method(target: &JsValue, name: &str, arg: Option<&str>) -> bool {
        let Ok(method) = js_sys::Reflect::get(target, &name.into()) else {
            return false;
        };
        let Some(function) = method.dyn_ref::<js_sys::Function>() else {
            return false;
        };
        let result = match arg {
            Some(arg) => function.call1(target, &arg.into()),
            None => function.call0(target),
        };
        result.is_ok()
    }

    fn global_object(name: &str) -> Option<JsValue> {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &name.into())
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    }

    /// Current builds: `window.Chatlet.toggle()`.
    pub struct PrimaryApi;

    impl WidgetProbe for PrimaryApi {
        fn try_toggle(&self) -> bool {
            global_object("Chatlet").is_some_and(|api| call_method(&api, "toggle", None))
        }
    }

    /// Interim builds: `window.chatlet_widget.toggle()`.
    pub struct WidgetApi;

    impl WidgetProbe for WidgetApi {
        fn try_toggle(&self) -> bool {
            global_object("chatlet_widget").is_some_and(|api| call_method(&api, "toggle", None))
        }
    }

    /// Legacy builds: `window.__chatlet("toggle")`.
    pub struct LegacyApi;

    impl WidgetProbe for LegacyApi {
        fn try_toggle(&self) -> bool {
            let Some(window) = web_sys::window() else {
                return false;
            };
            call_method(&window, "__chatlet", Some("toggle"))
        }
    }
}
