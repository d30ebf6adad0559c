use crate::llm::TextRewriteService;
use crate::units::format_km;

/// Rewrites routing text into friendlier phrasing when a language model is
/// configured, otherwise appends the step distance.
///
/// Rewritten and fallback output look the same to callers: both are plain
/// strings.
#[derive(Clone, Copy)]
pub struct InstructionEnricher<'a> {
    service: Option<&'a dyn TextRewriteService>,
}

impl<'a> InstructionEnricher<'a> {
    pub fn new(service: Option<&'a dyn TextRewriteService>) -> Self {
        Self { service }
    }

    pub fn enrich(&self, text: &str, distance_metres: f64) -> String {
        let Some(service) = self.service else {
            return fallback(text, distance_metres);
        };

        match service.rewrite(&rewrite_prompt(text, distance_metres)) {
            Ok(rewritten) if !rewritten.trim().is_empty() => rewritten.trim().to_string(),
            Ok(_) => {
                log::warn!("{} returned an empty rewrite for {:?}", service.backend_name(), text);
                fallback(text, distance_metres)
            }
            Err(e) => {
                log::warn!("Rewrite failed for {:?}: {}", text, e);
                fallback(text, distance_metres)
            }
        }
    }
}

/// `"<text> (<km> km)"` with one decimal.
pub fn fallback(text: &str, distance_metres: f64) -> String {
    format!("{} ({} km)", text, format_km(distance_metres))
}

fn rewrite_prompt(text: &str, distance_metres: f64) -> String {
    format!(
        "Rewrite this direction in more human-friendly language. \
         Keep the meaning exactly the same; if no better phrasing fits, keep it simple. \
         '{}' ({} km). Max 10 words. \
         Example: 'Turn left at the traffic light' -> 'Turn left at Starbucks'.",
        text,
        format_km(distance_metres)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::RewriteError;
    use std::cell::RefCell;

    struct Scripted {
        answer: Result<&'static str, ()>,
        prompts: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(answer: Result<&'static str, ()>) -> Self {
            Self {
                answer,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextRewriteService for Scripted {
        fn rewrite(&self, prompt: &str) -> Result<String, RewriteError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer
                .map(str::to_string)
                .map_err(|_| RewriteError::Request("operation timed out".into()))
        }

        fn backend_name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn no_service_appends_distance() {
        let enricher = InstructionEnricher::new(None);
        assert_eq!(enricher.enrich("Turn left", 1200.0), "Turn left (1.2 km)");
        assert_eq!(enricher.enrich("Arrive at destination", 0.0), "Arrive at destination (0.0 km)");
    }

    #[test]
    fn rewrite_is_used_and_trimmed() {
        let service = Scripted::new(Ok("  Turn left at the bakery\n"));
        let enricher = InstructionEnricher::new(Some(&service));
        assert_eq!(enricher.enrich("Turn left onto Main St", 1200.0), "Turn left at the bakery");
    }

    #[test]
    fn prompt_carries_text_distance_and_limits() {
        let service = Scripted::new(Ok("ok"));
        InstructionEnricher::new(Some(&service)).enrich("Turn left onto Main St", 1250.0);
        let prompts = service.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("'Turn left onto Main St'"));
        assert!(prompts[0].contains("1.2 km") || prompts[0].contains("1.3 km"));
        assert!(prompts[0].contains("Max 10 words"));
        assert!(prompts[0].contains("Keep the meaning"));
    }

    #[test]
    fn failure_falls_back() {
        let service = Scripted::new(Err(()));
        let enricher = InstructionEnricher::new(Some(&service));
        assert_eq!(enricher.enrich("Turn left", 1200.0), "Turn left (1.2 km)");
    }

    #[test]
    fn blank_answer_falls_back() {
        let service = Scripted::new(Ok("   "));
        let enricher = InstructionEnricher::new(Some(&service));
        assert_eq!(enricher.enrich("Keep right", 300.0), "Keep right (0.3 km)");
    }
}
