//! Ordered conditional routing: first matching route wins.

use std::sync::Arc;

use leadform_core::{Answer, ConditionalRoute, LlmJudge};

use crate::evaluator::ConditionEvaluator;

/// Result of scanning a conditional transition's routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The first matching route's destination. `None` explicitly terminates
    /// the form.
    Next(Option<String>),
    /// No route matched; the caller falls back to the transition's default.
    NoMatch,
}

pub struct Router {
    evaluator: ConditionEvaluator,
}

impl Router {
    pub fn new(judge: Arc<dyn LlmJudge>) -> Self {
        Self {
            evaluator: ConditionEvaluator::new(judge),
        }
    }

    pub fn evaluator(&self) -> &ConditionEvaluator {
        &self.evaluator
    }

    /// Evaluate routes in declaration order and return the first match.
    ///
    /// Each route's condition is awaited to a complete boolean before the
    /// decision is taken, even though AND/OR children inside it may finish
    /// out of order.
    pub async fn next_question(
        &self,
        routes: &[ConditionalRoute],
        answers: &[Answer],
        form_id: &str,
    ) -> RouteOutcome {
        for route in routes {
            if self
                .evaluator
                .evaluate(&route.condition, answers, form_id)
                .await
            {
                return RouteOutcome::Next(route.next_question_id.clone());
            }
        }
        RouteOutcome::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadform_core::{AnswerValue, Condition, ConditionOperator};
    use leadform_judge::MockJudge;
    use serde_json::json;

    fn route(question_id: &str, expected: &str, next: Option<&str>) -> ConditionalRoute {
        ConditionalRoute {
            condition: Condition::Static {
                question_id: question_id.into(),
                operator: ConditionOperator::Equals,
                value: json!(expected),
            },
            next_question_id: next.map(String::from),
        }
    }

    fn router() -> Router {
        Router::new(Arc::new(MockJudge::new()))
    }

    #[tokio::test]
    async fn first_match_wins_in_declaration_order() {
        let answers = vec![Answer::with_text("q", "Q", AnswerValue::Text("hit".into()))];
        let routes = vec![
            route("q", "miss", Some("a")),
            route("q", "hit", Some("b")),
            route("q", "hit", Some("c")),
        ];
        assert_eq!(
            router().next_question(&routes, &answers, "f1").await,
            RouteOutcome::Next(Some("b".into()))
        );
    }

    #[tokio::test]
    async fn no_match_reports_no_match_not_termination() {
        let answers = vec![Answer::with_text("q", "Q", AnswerValue::Text("other".into()))];
        let routes = vec![route("q", "miss", Some("a"))];
        assert_eq!(
            router().next_question(&routes, &answers, "f1").await,
            RouteOutcome::NoMatch
        );
    }

    #[tokio::test]
    async fn matching_route_with_null_target_terminates() {
        let answers = vec![Answer::with_text("q", "Q", AnswerValue::Text("done".into()))];
        let routes = vec![route("q", "done", None)];
        assert_eq!(
            router().next_question(&routes, &answers, "f1").await,
            RouteOutcome::Next(None)
        );
    }

    #[tokio::test]
    async fn empty_routes_never_match() {
        assert_eq!(
            router().next_question(&[], &[], "f1").await,
            RouteOutcome::NoMatch
        );
    }
}
