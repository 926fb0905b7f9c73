use crate::{
    Config,
    download::Downloader,
    key_handler,
    player::{AudioEvent, AudioHandle},
    presentation::PlaybackController,
    tui::{self, AppLayout},
    ui_state::UiState,
};
use anyhow::Result;
use crossbeam_channel::Receiver;
use ratatui::{
    DefaultTerminal,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        execute,
    },
    layout::Rect,
};
use std::{io::stdout, time::Instant};
use tracing::{error, info, warn};

pub struct Scrollcard {
    pub(crate) ui: UiState,
    pub(crate) controller: PlaybackController,
    audio_events: Receiver<AudioEvent>,
    downloader: Downloader,
    viewport: Option<(u16, u16)>,
}

impl Scrollcard {
    pub fn new(config: Config) -> Self {
        let ui = UiState::new(&config);

        let audio = AudioHandle::spawn(config.audio.clone());
        let audio_events = audio.events();

        let controller = PlaybackController::new(
            Box::new(audio),
            config.speeds,
            config.speed,
            config.scroll_padding,
        )
        .rescale_on_speed_change(config.rescale_on_speed_change);

        Scrollcard {
            ui,
            controller,
            audio_events,
            downloader: config.downloader,
            viewport: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal initialised");

        let result = self.main_loop(&mut terminal);

        if let Err(e) = execute!(stdout(), DisableMouseCapture) {
            warn!("Could not release mouse capture: {e}");
        }
        ratatui::restore();

        result
    }

    fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        // MAIN ROUTINE
        loop {
            self.drain_audio_events();

            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, &self.ui) {
                        self.dispatch(action);
                    }
                }
                Some(Event::Mouse(mouse)) => {
                    if let Some(action) = key_handler::handle_mouse_event(mouse, &self.ui) {
                        self.dispatch(action);
                    }
                }
                Some(Event::Resize(..)) => self.viewport = None,
                _ => (),
            }

            let size = terminal.size()?;
            self.measure(Rect::new(0, 0, size.width, size.height));

            let now = Instant::now();
            self.controller.tick(now);
            self.ui.sync_playback(self.controller.snapshot(), now);

            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            if self.ui.should_quit() {
                info!("Shutting down");
                break;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, action: key_handler::Action) {
        if let Err(e) = self.handle_action(action) {
            error!("{e:#}");
            self.ui.set_error(e);
        }
    }

    /// Rewraps the message and rebuilds scroll bounds whenever the
    /// terminal's dimensions change
    fn measure(&mut self, area: Rect) {
        if self.viewport == Some((area.width, area.height)) {
            return;
        }
        self.viewport = Some((area.width, area.height));

        let viewport = AppLayout::new(area).message_viewport();
        self.ui.message.rewrap(viewport.width);
        self.controller
            .recompute_bounds(self.ui.message.line_count(), viewport.height);
    }

    fn drain_audio_events(&mut self) {
        for event in self.audio_events.try_iter() {
            match event {
                AudioEvent::Started => info!("Audio started"),
                AudioEvent::Ended => info!("Audio reached the end of the track"),
                AudioEvent::Error(e) => warn!("Audio: {e}"),
            }
        }
    }

    pub(crate) fn download(&mut self, now: Instant) -> Result<()> {
        self.downloader.save(self.ui.message.text())?;
        self.ui.feedback.confirm(now);
        Ok(())
    }
}
