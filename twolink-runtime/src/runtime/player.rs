use std::time::Duration;

use nalgebra::Point2;
use tokio::sync::mpsc;

use crate::{
    controller::{ArmController, Tick},
    render::{Renderer, ScrubControl},
};

/// Input delivered to the player.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a screen position.
    Pointer(Point2<f32>),
    /// Scrub control moved to a normalized position.
    Scrub(f32),
    /// Stop the player.
    Shutdown,
}

pub type InputSender = mpsc::Sender<InputEvent>;
pub type InputReceiver = mpsc::Receiver<InputEvent>;

/// Create an input channel for the player.
pub fn channel() -> (InputSender, InputReceiver) {
    mpsc::channel(crate::consts::QUEUE_SIZE_INPUT)
}

/// Frame loop driving the arm controller.
///
/// Frame ticks and input events are handled one at a time, in the order
/// they arrive.
pub struct Player<R, S> {
    controller: ArmController,
    renderer: R,
    scrub: S,
    refresh_interval: Duration,
}

impl<R: Renderer, S: ScrubControl> Player<R, S> {
    pub fn new(
        controller: ArmController,
        renderer: R,
        scrub: S,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            controller,
            renderer,
            scrub,
            refresh_interval: refresh_interval.max(Duration::from_millis(1)),
        }
    }

    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    #[inline]
    pub fn controller(&self) -> &ArmController {
        &self.controller
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Release the renderer and the scrub control.
    pub fn into_parts(self) -> (ArmController, R, S) {
        (self.controller, self.renderer, self.scrub)
    }

    fn dispatch(&mut self, event: InputEvent) {
        log::trace!("Input event: {:?}", event);

        match event {
            InputEvent::Pointer(screen) => self.controller.on_pointer(&screen, &mut self.renderer),
            InputEvent::Scrub(fraction) => {
                self.controller.on_scrub_input(fraction, &mut self.renderer)
            }
            InputEvent::Shutdown => {}
        }
    }

    /// Play the timeline while handling input.
    ///
    /// Returns once no frame is pending and the input channel is closed, or
    /// on a shutdown event.
    pub async fn run(&mut self, mut input_rx: InputReceiver) {
        let mut interval = tokio::time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.controller.start(std::time::Instant::now(), &mut self.renderer);

        let mut input_open = true;

        loop {
            let frame_pending = self.controller.pending_request().is_some();

            if !frame_pending && !input_open {
                break;
            }

            tokio::select! {
                _ = interval.tick(), if frame_pending => {
                    if let Some(request) = self.controller.pending_request() {
                        let tick = self.controller.frame_tick(
                            request,
                            std::time::Instant::now(),
                            &mut self.renderer,
                            &mut self.scrub,
                        );

                        if tick == Tick::Finished {
                            log::debug!("Frame loop finished");
                        }
                    }
                }
                event = input_rx.recv(), if input_open => {
                    match event {
                        Some(InputEvent::Shutdown) => {
                            log::debug!("Shutting down player");
                            break;
                        }
                        Some(event) => self.dispatch(event),
                        None => {
                            log::debug!("Input source closed");
                            input_open = false;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::{ControlMode, TimelineState},
        render::{testing::Recorder, Projection, Style, Viewport},
    };
    use nalgebra::Vector2;
    use twolink_core::LinkLengths;

    fn controller(duration: Duration) -> ArmController {
        ArmController::new(
            LinkLengths::default(),
            Projection::new(Viewport::new(800.0, 600.0), 250.0),
            Style::default(),
            (Vector2::new(150.0, -50.0), Vector2::new(50.0, 100.0)),
            (duration, duration),
        )
    }

    #[tokio::test]
    async fn test_player_finishes() {
        let mut player = Player::new(
            controller(Duration::from_millis(60)),
            Recorder::default(),
            Vec::new(),
            Duration::from_millis(5),
        );

        let (input_tx, input_rx) = channel();
        drop(input_tx);

        player.run(input_rx).await;

        let (controller, renderer, scrub) = player.into_parts();

        assert_eq!(controller.state(), TimelineState::Finished);
        assert!(controller.elapsed() >= Duration::from_millis(60));
        assert!(renderer.frames.len() >= 2);
        assert_eq!(scrub.last(), Some(&1.0));
        assert!(scrub.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Renderer stalling on its second frame.
    #[derive(Default)]
    struct SlowRenderer {
        cleared: Vec<std::time::Instant>,
    }

    impl Renderer for SlowRenderer {
        fn clear(&mut self, _viewport: &Viewport, _background: &str) {
            self.cleared.push(std::time::Instant::now());

            if self.cleared.len() == 2 {
                std::thread::sleep(Duration::from_millis(45));
            }
        }

        fn draw_segment(
            &mut self,
            _segment: crate::render::Segment,
            _from: &Point2<f32>,
            _to: &Point2<f32>,
            _stroke: &crate::render::Stroke,
        ) {
        }
    }

    #[tokio::test]
    async fn test_player_late_tick_counts_wall_clock() {
        let mut player = Player::new(
            controller(Duration::from_millis(15)),
            SlowRenderer::default(),
            Vec::new(),
            Duration::from_millis(20),
        );

        let (input_tx, input_rx) = channel();
        drop(input_tx);

        player.run(input_rx).await;

        let (controller, renderer, _) = player.into_parts();

        assert_eq!(controller.state(), TimelineState::Finished);

        let first = renderer.cleared[0];
        let last = renderer.cleared[renderer.cleared.len() - 1];
        let drawn = last.duration_since(first);

        // The final tick fires late, its lateness must be part of the timeline.
        let elapsed = controller.elapsed();
        let deviation = if drawn > elapsed {
            drawn - elapsed
        } else {
            elapsed - drawn
        };

        assert!(elapsed >= Duration::from_millis(40));
        assert!(deviation < Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_player_zero_refresh_interval() {
        let mut player = Player::new(
            controller(Duration::from_millis(10)),
            Recorder::default(),
            Vec::new(),
            Duration::ZERO,
        );

        assert_eq!(player.refresh_interval(), Duration::from_millis(1));

        let (input_tx, input_rx) = channel();
        drop(input_tx);

        player.run(input_rx).await;

        assert_eq!(player.controller().state(), TimelineState::Finished);
    }

    #[tokio::test]
    async fn test_player_pointer_takes_over() {
        let mut player = Player::new(
            controller(Duration::from_secs(60)),
            Recorder::default(),
            Vec::new(),
            Duration::from_millis(5),
        );

        let (input_tx, input_rx) = channel();
        input_tx
            .send(InputEvent::Pointer(Point2::new(480.0, 280.0)))
            .await
            .unwrap();
        drop(input_tx);

        player.run(input_rx).await;

        let controller = player.controller();

        assert_eq!(controller.mode(), ControlMode::Manual);
        assert_eq!(controller.state(), TimelineState::Cancelled);

        let (_, _, effector) = player.renderer().last_frame()[1];
        assert!((effector - Point2::new(480.0, 280.0)).norm() < 0.01);
    }

    #[tokio::test]
    async fn test_player_shutdown() {
        let mut player = Player::new(
            controller(Duration::from_secs(60)),
            Recorder::default(),
            Vec::new(),
            Duration::from_millis(5),
        );

        let (input_tx, input_rx) = channel();
        input_tx.send(InputEvent::Scrub(0.5)).await.unwrap();
        input_tx.send(InputEvent::Shutdown).await.unwrap();

        player.run(input_rx).await;

        let controller = player.controller();

        assert_eq!(controller.state(), TimelineState::Running);
        assert!(controller.elapsed() >= Duration::from_secs(30));
        assert!(controller.elapsed() < Duration::from_secs(31));
    }
}
