use std::sync::Arc;

use crate::domain::record::{OwnerContact, Pet, RecordStore};
use crate::domain::session::SessionContext;
use crate::screens::list::ListScreen;
use crate::screens::render::{screen_text, ListView};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HomeTab {
    #[default]
    Pets,
    Owners
}

impl HomeTab {
    pub fn label(&self) -> &'static str {
        match self {
            HomeTab::Pets => "Pets",
            HomeTab::Owners => "Owners",
        }
    }
}

/// Tabbed home: one list screen per record kind, only the selected one active.
pub struct HomeScreen {
    selected: HomeTab,
    pets: ListScreen<Pet>,
    owners: ListScreen<OwnerContact>,
}

impl HomeScreen {

    pub fn new(session: Arc<dyn SessionContext>, store: Arc<dyn RecordStore>) -> Self {
        HomeScreen {
            selected: HomeTab::default(),
            pets: ListScreen::new(Arc::clone(&session), Arc::clone(&store)),
            owners: ListScreen::new(session, store),
        }
    }

    pub fn selected(&self) -> HomeTab {
        self.selected
    }

    /// Shows the home screen, activating the selected tab. Calling it again
    /// refreshes that tab.
    pub fn open(&mut self) {
        let tab = self.selected;
        self.activate(tab);
    }

    /// Switches tabs. Selecting the tab already shown does nothing.
    pub fn select_tab(&mut self, tab: HomeTab) {
        if tab == self.selected {
            return;
        }

        log::debug!("Switching home tab {:?} -> {:?}", self.selected, tab);
        match self.selected {
            HomeTab::Pets => self.pets.deactivate(),
            HomeTab::Owners => self.owners.deactivate(),
        }
        self.selected = tab;
        self.activate(tab);
    }

    pub fn close(&mut self) {
        self.pets.deactivate();
        self.owners.deactivate();
    }

    pub fn pets(&self) -> &ListScreen<Pet> {
        &self.pets
    }

    pub fn owners(&self) -> &ListScreen<OwnerContact> {
        &self.owners
    }

    pub fn title(&self) -> &'static str {
        match self.selected {
            HomeTab::Pets => screen_text(self.pets.kind()).title,
            HomeTab::Owners => screen_text(self.owners.kind()).title,
        }
    }

    pub fn view(&self) -> ListView {
        match self.selected {
            HomeTab::Pets => self.pets.view(),
            HomeTab::Owners => self.owners.view(),
        }
    }

    /// Waits until the selected tab leaves `Loading` and returns its view.
    /// `None` when that tab is not active.
    pub async fn settled_view(&self) -> Option<ListView> {
        match self.selected {
            HomeTab::Pets => self.pets.settled().await.map(|state| state.render()),
            HomeTab::Owners => self.owners.settled().await.map(|state| state.render()),
        }
    }

    fn activate(&mut self, tab: HomeTab) {
        match tab {
            HomeTab::Pets => { self.pets.activate(); },
            HomeTab::Owners => { self.owners.activate(); },
        }
    }
}
