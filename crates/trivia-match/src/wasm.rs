//! WASM bindings for the browser front end
//!
//! The page owns the DOM and the `fetch` call. It registers two render
//! callbacks, forwards user actions, and hands fetched bodies back:
//!
//! ```js
//! const game = new TriviaMatch();
//! game.onQuestion(view => renderQuestion(view));
//! game.onSummary(summary => renderSummary(summary));
//! game.startMatch("Ann", "Bo");
//! const req = game.requestCategory("music");
//! fetch(req.url)
//!   .then(r => r.text())
//!   .then(body => game.receiveQuestions(body))
//!   .catch(e => game.failQuestions(String(e)));
//! ```

#![cfg(feature = "wasm")]

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    MatchConfig, MatchController, MatchError, MatchEvent, Presenter, QuestionView, SourceError,
    Summary,
};

fn js_error(err: MatchError) -> JsError {
    JsError::new(&format!("{}: {}", err.code(), err))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Seed drawn from the page's `Math.random` and clock
fn browser_seed() -> u64 {
    let random = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let now = js_sys::Date::now() as u64;
    random ^ now.rotate_left(32)
}

/// Forwards render calls to the registered JS callbacks
struct JsPresenter<'a> {
    on_question: Option<&'a Function>,
    on_summary: Option<&'a Function>,
}

impl JsPresenter<'_> {
    fn call<T: Serialize>(callback: Option<&Function>, value: &T) {
        let Some(callback) = callback else {
            return;
        };
        match serde_wasm_bindgen::to_value(value) {
            Ok(arg) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
                    log::warn!("render callback threw: {:?}", e);
                }
            }
            Err(e) => log::warn!("could not serialize render payload: {}", e),
        }
    }
}

impl Presenter for JsPresenter<'_> {
    fn show_question(&mut self, view: &QuestionView) {
        Self::call(self.on_question, view);
    }

    fn show_summary(&mut self, summary: &Summary) {
        Self::call(self.on_summary, summary);
    }
}

/// One trivia match driven from JavaScript
#[wasm_bindgen(js_name = TriviaMatch)]
pub struct WasmMatch {
    controller: MatchController,
    on_question: Option<Function>,
    on_summary: Option<Function>,
}

impl WasmMatch {
    fn render(&self, event: &MatchEvent) {
        let mut presenter = JsPresenter {
            on_question: self.on_question.as_ref(),
            on_summary: self.on_summary.as_ref(),
        };
        event.render(&mut presenter);
    }
}

#[wasm_bindgen(js_class = TriviaMatch)]
impl WasmMatch {
    /// Create a match. `config_json` overrides fields of the standard config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmMatch, JsError> {
        let config = match config_json {
            Some(json) => MatchConfig::from_json(&json).map_err(js_error)?,
            None => MatchConfig::standard(),
        };
        let controller = MatchController::new(config, browser_seed()).map_err(js_error)?;
        Ok(WasmMatch {
            controller,
            on_question: None,
            on_summary: None,
        })
    }

    /// Register the callback receiving `{playerName, questionText, answerOptions, ...}`
    #[wasm_bindgen(js_name = onQuestion)]
    pub fn on_question(&mut self, callback: Function) {
        self.on_question = Some(callback);
    }

    /// Register the callback receiving `{scores, winnerText, ...}`
    #[wasm_bindgen(js_name = onSummary)]
    pub fn on_summary(&mut self, callback: Function) {
        self.on_summary = Some(callback);
    }

    #[wasm_bindgen(js_name = startMatch)]
    pub fn start_match(&mut self, first: &str, second: &str) -> Result<(), JsError> {
        self.controller.start_match(first, second).map_err(js_error)
    }

    /// Validate a category and get the request to fetch: `{category, limit, url}`
    #[wasm_bindgen(js_name = requestCategory)]
    pub fn request_category(&mut self, category: &str) -> Result<JsValue, JsError> {
        let request = self
            .controller
            .begin_category_selection(category)
            .map_err(js_error)?;
        to_js(&request)
    }

    /// Hand over the fetched response body; renders the first question
    #[wasm_bindgen(js_name = receiveQuestions)]
    pub fn receive_questions(&mut self, body: String) -> Result<(), JsError> {
        let event = self
            .controller
            .complete_category_selection(Ok(body))
            .map_err(js_error)?;
        self.render(&event);
        Ok(())
    }

    /// Report a failed fetch (network error or non-2xx `status`)
    #[wasm_bindgen(js_name = failQuestions)]
    pub fn fail_questions(&mut self, message: &str, status: Option<u16>) -> Result<(), JsError> {
        let err = match status {
            Some(status) => SourceError::Status(status),
            None => SourceError::Transport(message.to_string()),
        };
        self.controller
            .complete_category_selection(Err(err))
            .map(|_| ())
            .map_err(js_error)
    }

    /// Score an answer and render the next turn; returns the answer outcome
    #[wasm_bindgen(js_name = submitAnswer)]
    pub fn submit_answer(&mut self, answer: &str) -> Result<JsValue, JsError> {
        let outcome = self.controller.submit_answer(answer).map_err(js_error)?;
        self.render(&outcome.next);
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = continueToNextRound)]
    pub fn continue_to_next_round(&mut self) -> Result<(), JsError> {
        self.controller.continue_to_next_round().map_err(js_error)
    }

    /// Stop the match and render the final summary
    #[wasm_bindgen(js_name = stopMatch)]
    pub fn stop_match(&mut self) -> Result<(), JsError> {
        let event = self.controller.stop_match().map_err(js_error)?;
        self.render(&event);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Categories not yet played in this match
    #[wasm_bindgen(js_name = availableCategories)]
    pub fn available_categories(&self) -> Result<JsValue, JsError> {
        to_js(&self.controller.available_categories())
    }

    pub fn summary(&self) -> Result<JsValue, JsError> {
        to_js(&self.controller.summary())
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.controller.phase())
    }

    #[wasm_bindgen(js_name = isRetrieving)]
    pub fn is_retrieving(&self) -> bool {
        self.controller.is_retrieving()
    }
}
