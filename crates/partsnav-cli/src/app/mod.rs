pub mod input;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use partsnav_core::{Deferred, Effect, InputEvent, Navigator, TimerQueue};
use tracing::debug;

use crate::ui::render::write_frame;

/// Upper bound on a single input wait while no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct App {
    navigator: Navigator,
    timers: TimerQueue<Deferred>,
    interactive_input: bool,
    clear_screen: bool,
    dirty: bool,
}

impl App {
    pub fn new(navigator: Navigator, interactive_input: bool) -> Self {
        Self {
            navigator,
            timers: TimerQueue::new(),
            interactive_input,
            clear_screen: true,
            dirty: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;

        toggle_raw_mode(self.interactive_input, enable_raw_mode)?;

        let loop_result = self.run_loop(&mut stdout, event::poll, event::read);
        let finish_result = self.finish(&mut stdout);

        toggle_raw_mode(self.interactive_input, disable_raw_mode)?;
        stdout.execute(Show)?;
        stdout.execute(LeaveAlternateScreen)?;

        loop_result.and(finish_result.map_err(anyhow::Error::from))
    }

    fn run_loop<W, P, R>(&mut self, out: &mut W, mut poll: P, mut read: R) -> Result<()>
    where
        W: Write,
        P: FnMut(Duration) -> io::Result<bool>,
        R: FnMut() -> io::Result<Event>,
    {
        while !self.navigator.is_exiting() {
            self.fire_due(Instant::now());

            if self.dirty {
                self.draw(out)?;
            }

            if !self.interactive_input {
                break;
            }

            let timeout = self.poll_timeout(Instant::now());
            if let Some(input_event) = next_terminal_input(&mut poll, &mut read, timeout)? {
                self.apply(input_event, Instant::now());
            }
        }
        Ok(())
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let frame = self.navigator.render();
        let clear = std::mem::take(&mut self.clear_screen);
        write_frame(out, &frame, clear)?;
        self.dirty = false;
        Ok(())
    }

    fn apply(&mut self, input_event: InputEvent, now: Instant) {
        for effect in self.navigator.handle(input_event) {
            match effect {
                Effect::ClearScreen => self.clear_screen = true,
                Effect::Schedule { delay, task } => {
                    debug!(?task, delay_ms = delay.as_millis(), "timer scheduled");
                    self.timers.schedule(now, delay, task);
                }
                Effect::Exit => debug!("exit requested"),
            }
        }
        self.dirty = true;
    }

    fn fire_due(&mut self, now: Instant) {
        for task in self.timers.pop_due(now) {
            if self.navigator.fire(task) {
                self.dirty = true;
            }
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.timers.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Deletes every transmitted image before the terminal is handed back.
    fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.navigator.is_exiting() {
            self.navigator.quit();
        }
        if let Some(target) = self.navigator.take_pending_clear() {
            out.write_all(target.escape().as_bytes())?;
        }
        out.flush()
    }
}

fn toggle_raw_mode<F>(interactive: bool, mut f: F) -> Result<()>
where
    F: FnMut() -> io::Result<()>,
{
    if interactive {
        f()?;
    }
    Ok(())
}

fn next_terminal_input<P, R>(
    mut poll: P,
    mut read: R,
    timeout: Duration,
) -> Result<Option<InputEvent>>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    if !poll(timeout)? {
        return Ok(None);
    }
    Ok(input::map_event(read()?))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use partsnav_core::{
        ClearTarget, InputEvent, Key, Navigator, Screen, ScreenView, Theme, Viewport,
    };

    use super::{App, IDLE_POLL, next_terminal_input, toggle_raw_mode};
    use crate::catalog::tests::seeded;
    use crate::images::FsImageLoader;

    fn app(interactive: bool) -> App {
        let navigator = Navigator::new(
            Box::new(seeded(false)),
            Box::new(FsImageLoader),
            PathBuf::from("/nonexistent-catalog"),
            Theme::default(),
            Viewport::new(100, 30),
        );
        App::new(navigator, interactive)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn scripted(
        events: Vec<Event>,
    ) -> (
        impl FnMut(Duration) -> io::Result<bool>,
        impl FnMut() -> io::Result<Event>,
    ) {
        let queue = Rc::new(RefCell::new(VecDeque::from(events)));
        let pending = Rc::clone(&queue);
        let poll = move |_: Duration| -> io::Result<bool> { Ok(!pending.borrow().is_empty()) };
        let read = move || {
            queue
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| io::Error::other("no scripted event"))
        };
        (poll, read)
    }

    #[test]
    fn loop_walks_screens_and_stops_on_exit() {
        let mut app = app(true);
        let (poll, read) = scripted(vec![
            press(KeyCode::Enter),
            press(KeyCode::Esc),
            press(KeyCode::Esc),
        ]);
        let mut out = Vec::new();
        app.run_loop(&mut out, poll, read).expect("loop");

        assert!(app.navigator.is_exiting());
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("GROUPS"));
        assert!(text.contains("BODY"));

        let mut tail = Vec::new();
        app.finish(&mut tail).expect("finish");
        assert_eq!(tail, ClearTarget::All.escape().into_bytes());
    }

    #[test]
    fn non_interactive_draws_once() {
        let mut app = app(false);
        let mut out = Vec::new();
        app.run_loop(
            &mut out,
            |_| panic!("must not poll"),
            || panic!("must not read"),
        )
        .expect("loop");
        assert!(String::from_utf8_lossy(&out).contains("PARTS CATALOG"));
        assert!(!app.dirty);

        let mut tail = Vec::new();
        app.finish(&mut tail).expect("finish");
        assert!(app.navigator.is_exiting());
        assert_eq!(tail, ClearTarget::All.escape().into_bytes());
    }

    #[test]
    fn typed_query_runs_after_debounce() {
        let mut app = app(true);
        let start = Instant::now();
        app.apply(InputEvent::Key(Key::Char('/')), start);
        app.apply(InputEvent::Key(Key::Char('h')), start);
        app.apply(InputEvent::Key(Key::Char('e')), start + Duration::from_millis(40));
        assert_eq!(app.timers.len(), 2);
        assert_eq!(app.poll_timeout(start), Duration::from_millis(150));

        app.dirty = false;
        app.fire_due(start + Duration::from_millis(160));
        assert!(!app.dirty, "stale lookup must not redraw");

        app.fire_due(start + Duration::from_millis(200));
        assert!(app.dirty);
        assert!(app.timers.is_empty());
        assert_eq!(app.poll_timeout(start), IDLE_POLL);

        let ScreenView::Search(view) = app.navigator.view() else {
            panic!("expected search screen");
        };
        assert_eq!(view.coordinator().applied_query(), Some("he"));
        assert_eq!(view.coordinator().results().len(), 2);
    }

    #[test]
    fn navigation_requests_a_full_clear() {
        let mut app = app(true);
        let mut out = Vec::new();
        app.draw(&mut out).expect("first draw");
        assert!(!app.clear_screen);

        app.apply(InputEvent::Key(Key::Enter), Instant::now());
        assert!(app.clear_screen);
        assert_eq!(app.navigator.screen(), &Screen::group("body"));

        app.apply(
            InputEvent::Resize {
                width: 90,
                height: 20,
            },
            Instant::now(),
        );
        assert_eq!(app.navigator.viewport(), Viewport::new(90, 20));
    }

    #[test]
    fn next_terminal_input_skips_when_poll_times_out() {
        let got = next_terminal_input(
            |timeout| {
                assert_eq!(timeout, Duration::from_millis(42));
                Ok(false)
            },
            || panic!("must not read"),
            Duration::from_millis(42),
        )
        .expect("poll");
        assert_eq!(got, None);
    }

    #[test]
    fn next_terminal_input_maps_key_and_propagates_read_error() {
        let got = next_terminal_input(|_| Ok(true), || Ok(press(KeyCode::Char('q'))), IDLE_POLL)
            .expect("press");
        assert_eq!(got, Some(InputEvent::Key(Key::Char('q'))));

        let err = next_terminal_input(
            |_| Ok(true),
            || Err(io::Error::other("read failed")),
            IDLE_POLL,
        )
        .expect_err("read error");
        assert!(err.to_string().contains("read failed"));
    }

    #[test]
    fn toggle_raw_mode_propagates_error() {
        let err = toggle_raw_mode(true, || Err(io::Error::other("raw mode failed")))
            .expect_err("expected error");
        assert!(err.to_string().contains("raw mode failed"));
    }

    #[test]
    fn toggle_raw_mode_skips_when_not_interactive() {
        let mut called = false;
        toggle_raw_mode(false, || {
            called = true;
            Ok(())
        })
        .expect("false branch");
        assert!(!called);

        toggle_raw_mode(true, || {
            called = true;
            Ok(())
        })
        .expect("true branch");
        assert!(called);
    }
}
