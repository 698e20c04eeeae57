use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::{debug, warn};

use crate::ports::{CatalogSource, ReportPresenter};
use crate::services::report::{CategoriesInit, DataInit, FilterOutcome, ReportService};

/// Evento de la sesión de filtrado.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
  Filter { search_text: String, category: String },
  Shutdown,
}

/// Sesión de informe: un manejador de eventos monohilo que serializa las
/// peticiones de filtro y traduce los desenlaces del pipeline a llamadas
/// sobre la presentación.
///
/// Hay como mucho una petición en vuelo; una ráfaga de peticiones en cola
/// se colapsa y sólo se aplica la más reciente (las anteriores quedan
/// supersedidas, no canceladas a medias).
pub struct ReportSession<S: CatalogSource, P: ReportPresenter> {
  service: ReportService<S>,
  presenter: P,
}

impl<S: CatalogSource, P: ReportPresenter> ReportSession<S, P> {
  pub fn new(service: ReportService<S>, presenter: P) -> Self {
    Self { service, presenter }
  }

  /// Carga inicial: vuelca el resultado de `initialize` sobre la
  /// presentación.
  pub fn start(&mut self) {
    let init = self.service.initialize();

    match init.data {
      DataInit::Ready { table, chart } => {
        self.presenter.set_table(&table);
        self.presenter.set_chart(&chart);
      }
      DataInit::Missing { note } => {
        // Sin datos al arrancar: la gráfica se limpia, la tabla se deja
        // como esté.
        warn!(%note, "informe sin datos iniciales");
        self.presenter.notify(&note);
        self.presenter.clear_chart();
      }
      DataInit::Failed { note } => {
        warn!(%note, "fallo al inicializar el informe");
        self.presenter.notify(&note);
      }
    }

    match init.categories {
      CategoriesInit::Ready(names) => self.presenter.set_categories(&names),
      CategoriesInit::Missing { note } | CategoriesInit::Failed { note } => {
        warn!(%note, "sin categorías para el filtro");
        self.presenter.notify(&note);
      }
    }
  }

  /// Aplica un filtro y vuelca el desenlace sobre la presentación.
  pub fn apply(&mut self, search_text: &str, category: &str) {
    match self.service.apply_filter(search_text, category) {
      FilterOutcome::Updated { table, chart } => {
        self.presenter.set_table(&table);
        self.presenter.set_chart(&chart);
      }
      FilterOutcome::NoData { note } => {
        // Sin datos al filtrar: aquí la tabla SÍ se vacía, a diferencia
        // de la inicialización.
        warn!(%note, "sin datos al aplicar filtros");
        self.presenter.notify(&note);
        self.presenter.reset_table();
        self.presenter.clear_chart();
      }
      FilterOutcome::Failed { note } => {
        warn!(%note, "fallo al aplicar filtros");
        self.presenter.notify(&note);
      }
    }
  }

  /// Bucle de eventos bloqueante hasta `Shutdown` o cierre del canal.
  ///
  /// Antes de despachar se drena la cola: si llegaron más filtros, sólo el
  /// último cuenta. Un `Shutdown` encolado deja aplicar el filtro más
  /// reciente y después termina.
  pub fn run(&mut self, events: Receiver<SessionEvent>) {
    loop {
      let first = match events.recv() {
        Ok(event) => event,
        Err(_) => return,
      };

      let mut latest = match first {
        SessionEvent::Shutdown => return,
        filter => filter,
      };

      let mut shutdown = false;
      loop {
        match events.try_recv() {
          Ok(SessionEvent::Shutdown) => {
            shutdown = true;
            break;
          }
          Ok(filter) => latest = filter,
          Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
      }

      if let SessionEvent::Filter { search_text, category } = latest {
        debug!(%search_text, %category, "despachando filtro");
        self.apply(&search_text, &category);
      }

      if shutdown {
        return;
      }
    }
  }

  /// Acceso a la presentación, útil para recuperar estado tras la sesión.
  pub fn presenter(&self) -> &P {
    &self.presenter
  }
}
