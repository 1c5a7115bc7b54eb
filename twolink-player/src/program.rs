use std::{collections::VecDeque, path::Path, time::Duration};

use nalgebra::Point2;
use twolink::runtime::{InputEvent, InputSender};

#[derive(Clone, Copy, Debug, PartialEq, serde_derive::Deserialize)]
#[serde(rename_all = "snake_case")]
enum Action {
    /// Pointer position in screen coordinates.
    Pointer([f32; 2]),
    /// Normalized scrub position.
    Scrub(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, serde_derive::Deserialize)]
struct Step {
    /// Delay before the action is delivered.
    #[serde(default)]
    delay_ms: u64,
    #[serde(flatten)]
    action: Action,
}

impl Step {
    fn event(&self) -> InputEvent {
        match self.action {
            Action::Pointer([x, y]) => InputEvent::Pointer(Point2::new(x, y)),
            Action::Scrub(fraction) => InputEvent::Scrub(fraction),
        }
    }
}

/// Scripted input replayed against the player.
pub struct Program(VecDeque<Step>);

impl Program {
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let str = std::fs::read_to_string(path)?;

        Ok(Self::parse(&str)?)
    }

    pub fn parse(str: &str) -> serde_json::Result<Self> {
        Ok(Self(serde_json::from_str::<VecDeque<Step>>(str)?))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deliver every step to the player, then close the input.
    pub async fn replay(mut self, input_tx: InputSender) {
        while let Some(step) = self.0.pop_front() {
            if step.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
            }

            if input_tx.send(step.event()).await.is_err() {
                log::debug!("Player stopped, dropping remaining input");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_parse() {
        let program = Program::parse(
            r#"[
                {"delay_ms": 1500, "pointer": [520.0, 300.0]},
                {"scrub": 0.5}
            ]"#,
        )
        .unwrap();

        assert_eq!(program.len(), 2);
        assert_eq!(program.0[0].delay_ms, 1500);
        assert_eq!(
            program.0[0].event(),
            InputEvent::Pointer(Point2::new(520.0, 300.0))
        );
        assert_eq!(program.0[1].delay_ms, 0);
        assert_eq!(program.0[1].event(), InputEvent::Scrub(0.5));
    }

    #[test]
    fn test_program_invalid() {
        assert!(Program::parse(r#"[{"delay_ms": 10}]"#).is_err());
        assert!(Program::parse("{}").is_err());
        assert!(Program::parse("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_program_replay() {
        let program =
            Program::parse(r#"[{"scrub": 0.25}, {"delay_ms": 5, "scrub": 0.75}]"#).unwrap();

        let (input_tx, mut input_rx) = twolink::runtime::channel();

        program.replay(input_tx).await;

        assert_eq!(input_rx.recv().await, Some(InputEvent::Scrub(0.25)));
        assert_eq!(input_rx.recv().await, Some(InputEvent::Scrub(0.75)));
        assert_eq!(input_rx.recv().await, None);
    }
}
