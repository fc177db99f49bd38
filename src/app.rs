use std::{future::Future, sync::Arc};

use color_eyre::eyre::{self, Result};
use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
  action::Action,
  cli::Cli,
  components::{documents::Documents, Component},
  config::Config,
  mode::Mode,
  source::{DocumentSource, JsonSource, SqliteSource},
  table::PageRequest,
  tui,
};

pub struct App {
  pub config: Config,
  pub tick_rate: f64,
  pub frame_rate: f64,
  pub components: Vec<Box<dyn Component>>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  pub last_tick_key_events: Vec<KeyEvent>,
  source: Arc<dyn DocumentSource>,
}

impl App {
  pub async fn new(cli_args: &Cli) -> Result<Self> {
    let mut config = Config::new()?;
    if let Some(page_size) = cli_args.page_size {
      config.table.page_size = page_size.max(1);
    }
    if let Some(threshold) = cli_args.threshold {
      config.table.local_threshold = threshold;
    }

    let roles = config.table.roles.clone();
    let source: Arc<dyn DocumentSource> = if let Some(path) = &cli_args.json {
      Arc::new(JsonSource::open(path, roles).await?)
    } else if let Some(path) = &cli_args.sqlite {
      Arc::new(SqliteSource::open(path, &cli_args.table, roles).await?)
    } else {
      eyre::bail!("Either --json or --sqlite is required");
    };

    Ok(Self::with_source(config, source, cli_args.tick_rate, cli_args.frame_rate))
  }

  pub fn with_source(config: Config, source: Arc<dyn DocumentSource>, tick_rate: f64, frame_rate: f64) -> Self {
    let documents = Documents::new_with_config(Some(config.clone())).with_source_name(source.name());
    Self {
      config,
      tick_rate,
      frame_rate,
      components: vec![Box::new(documents)],
      should_quit: false,
      should_suspend: false,
      mode: Mode::Home,
      last_tick_key_events: Vec::new(),
      source,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = tui::Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    for component in self.components.iter_mut() {
      component.register_action_handler(action_tx.clone())?;
    }

    for component in self.components.iter_mut() {
      component.register_config_handler(self.config.clone())?;
    }

    for component in self.components.iter_mut() {
      component.init(Rect::default())?;
    }

    action_tx.send(Action::LoadDocuments)?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(keymap) = self.config.keybindings.get(&self.mode) {
              if let Some(action) = keymap.get(&vec![key]) {
                info!("Got action: {action:?}");
                action_tx.send(action.clone())?;
              } else {
                // Not a single-key binding, so try it as part of a sequence.
                self.last_tick_key_events.push(key);

                if let Some(action) = keymap.get(&self.last_tick_key_events) {
                  info!("Got action: {action:?}");
                  action_tx.send(action.clone())?;
                }
              }
            };
          },
          _ => {},
        }
        for component in self.components.iter_mut() {
          if let Some(action) = component.handle_events(Some(e.clone()))? {
            action_tx.send(action)?;
          }
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          debug!("{action:?}");
        }
        match action {
          Action::Tick => {
            self.last_tick_key_events.drain(..);
          },
          Action::Quit => self.should_quit = true,
          Action::Suspend => self.should_suspend = true,
          Action::Resume => self.should_suspend = false,
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.draw(&mut tui, &action_tx)?;
          },
          Action::Render => self.draw(&mut tui, &action_tx)?,
          Action::Refresh => action_tx.send(Action::LoadDocuments)?,
          Action::LoadDocuments => {
            let threshold = self.config.table.local_threshold;
            spawn_task(action_tx.clone(), load_documents(action_tx.clone(), self.source.clone(), threshold));
          },
          Action::FetchPage(ref request) => {
            spawn_task(action_tx.clone(), fetch_page(action_tx.clone(), self.source.clone(), request.clone()));
          },
          Action::PageChanged(page) => debug!(page, "page changed"),
          Action::SwitchMode(mode) => {
            self.mode = mode;
            self.last_tick_key_events.clear();
          },
          _ => {},
        }
        for component in self.components.iter_mut() {
          if let Some(action) = component.update(action.clone())? {
            action_tx.send(action)?
          };
        }
      }

      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = tui::Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn draw(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    tui.draw(|f| {
      for component in self.components.iter_mut() {
        if let Err(e) = component.draw(f, f.area()) {
          let _ = action_tx.send(Action::Error(format!("Failed to draw: {e:?}")));
        }
      }
    })?;
    Ok(())
  }
}

pub async fn dispatch(tx: UnboundedSender<Action>, action: Action) -> Result<()> {
  if let Err(e) = tx.send(action) {
    error!("Error dispatching: {e:?}");
  }

  Ok(())
}

/// Runs a source call in the background; failures come back as `Action::Error`.
fn spawn_task<F>(tx: UnboundedSender<Action>, task: F)
where
  F: Future<Output = Result<()>> + Send + 'static,
{
  tokio::spawn(async move {
    if let Err(e) = task.await {
      error!("Source task failed: {e:?}");
      let _ = tx.send(Action::Error(format!("{e}")));
    }
  });
}

/// Counts the documents and, below the local threshold, reads them all. Above it only the
/// count is sent and pages are fetched on demand.
pub async fn load_documents(
  tx: UnboundedSender<Action>,
  source: Arc<dyn DocumentSource>,
  local_threshold: usize,
) -> Result<()> {
  let total = source.count().await?;
  let rows = if total < local_threshold { source.load_all().await? } else { vec![] };
  info!(total, loaded = rows.len(), "documents counted");
  dispatch(tx, Action::DocumentsLoaded(rows, total)).await
}

pub async fn fetch_page(tx: UnboundedSender<Action>, source: Arc<dyn DocumentSource>, request: PageRequest) -> Result<()> {
  let page = source.fetch_page(&request).await?;
  dispatch(tx, Action::PageLoaded(request, page.rows, page.total)).await
}
