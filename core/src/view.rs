//! Page state for the exercise front end, driven by plain requests and
//! responses.
//!
//! # Design
//! Pages never perform I/O. An action returns the `HttpRequest` to run and a
//! matching `on_*` method consumes the `HttpResponse`, updating local state
//! and producing a user-facing `Notice` or the next `Route`.
//!
//! The record being edited travels inside `Route::Edit`, so the edit page is
//! built from its navigation payload rather than from state shared with the
//! home page.

use uuid::Uuid;

use crate::client::ExerciseClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Exercise, ExerciseInput};

/// Tabular rendering of a loaded exercise list.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseTable<'a> {
    exercises: &'a [Exercise],
}

impl<'a> ExerciseTable<'a> {
    const COLUMNS: [&'static str; 5] = ["NAME", "REPS", "WEIGHT", "UNITS", "DATE"];

    pub fn new(exercises: &'a [Exercise]) -> Self {
        Self { exercises }
    }

    /// Header labels, in display order.
    pub fn columns(&self) -> [&'static str; 5] {
        Self::COLUMNS
    }

    /// One row of display cells per exercise, aligned with `columns()`.
    pub fn rows(&self) -> Vec<[String; 5]> {
        self.exercises
            .iter()
            .map(|e| {
                [
                    e.name.clone(),
                    e.reps.to_string(),
                    e.weight.to_string(),
                    e.unit.as_str().to_string(),
                    e.date.clone(),
                ]
            })
            .collect()
    }
}

/// Where the user is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Create,
    /// Edit view for the carried record.
    Edit(Exercise),
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

impl Notice {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Result of submitting a form: tell the user something, then go somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Notice,
    pub route: Route,
}

/// The exercise list.
#[derive(Debug, Clone)]
pub struct HomePage {
    client: ExerciseClient,
    exercises: Vec<Exercise>,
}

impl HomePage {
    pub fn new(client: ExerciseClient) -> Self {
        Self {
            client,
            exercises: Vec::new(),
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn table(&self) -> ExerciseTable<'_> {
        ExerciseTable::new(&self.exercises)
    }

    pub fn load(&self) -> HttpRequest {
        self.client.build_list_exercises()
    }

    /// Replace the list with a fresh fetch. On error the list is kept.
    pub fn on_loaded(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        self.exercises = self.client.parse_list_exercises(response)?;
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> HttpRequest {
        self.client.build_delete_exercise(id)
    }

    /// Drop the record locally on 204; anything else leaves the list alone
    /// and yields a failure notice.
    pub fn on_deleted(&mut self, id: Uuid, response: HttpResponse) -> Option<Notice> {
        let status = response.status;
        match self.client.parse_delete_exercise(response) {
            Ok(()) => {
                self.exercises.retain(|e| e.id != id);
                None
            }
            Err(_) => Some(Notice(format!(
                "Failed to delete exercise with id = {id}, status code = {status}"
            ))),
        }
    }

    pub fn edit(&self, exercise: &Exercise) -> Route {
        Route::Edit(exercise.clone())
    }
}

/// Form for changing an existing exercise.
#[derive(Debug, Clone)]
pub struct EditPage {
    client: ExerciseClient,
    id: Uuid,
    pub form: ExerciseInput,
}

impl EditPage {
    /// Pre-populate the form from the record being edited.
    pub fn new(client: ExerciseClient, exercise: &Exercise) -> Self {
        Self {
            client,
            id: exercise.id,
            form: ExerciseInput::from(exercise),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn submit(&self) -> Result<HttpRequest, ApiError> {
        self.client.build_update_exercise(self.id, &self.form)
    }

    /// Report the result and return to the list either way.
    pub fn on_submitted(&self, response: HttpResponse) -> Outcome {
        let message = if response.status == 200 {
            "Successfully edited the exercise".to_string()
        } else {
            format!(
                "Failed to edit the exercise, status code = {}",
                response.status
            )
        };
        Outcome {
            notice: Notice(message),
            route: Route::Home,
        }
    }
}

/// Form for recording a new exercise.
#[derive(Debug, Clone)]
pub struct CreatePage {
    client: ExerciseClient,
    pub form: ExerciseInput,
}

impl CreatePage {
    pub fn new(client: ExerciseClient) -> Self {
        Self {
            client,
            form: ExerciseInput::default(),
        }
    }

    pub fn submit(&self) -> Result<HttpRequest, ApiError> {
        self.client.build_create_exercise(&self.form)
    }

    pub fn on_submitted(&self, response: HttpResponse) -> Outcome {
        let message = if response.status == 201 {
            "Successfully added the exercise".to_string()
        } else {
            format!(
                "Failed to add the exercise, status code = {}",
                response.status
            )
        };
        Outcome {
            notice: Notice(message),
            route: Route::Home,
        }
    }
}

/// The page currently mounted.
#[derive(Debug, Clone)]
pub enum Page {
    Home,
    Create(CreatePage),
    Edit(EditPage),
}

/// Top-level navigation: owns the home list and mounts form pages on demand.
#[derive(Debug, Clone)]
pub struct App {
    client: ExerciseClient,
    route: Route,
    page: Page,
    pub home: HomePage,
}

impl App {
    pub fn new(client: ExerciseClient) -> Self {
        Self {
            home: HomePage::new(client.clone()),
            client,
            route: Route::Home,
            page: Page::Home,
        }
    }

    /// Request that populates the list on first display.
    pub fn start(&self) -> HttpRequest {
        self.home.load()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Switch pages. Returning to the list yields the fetch that refreshes it.
    pub fn navigate(&mut self, route: Route) -> Option<HttpRequest> {
        self.page = match &route {
            Route::Home => Page::Home,
            Route::Create => Page::Create(CreatePage::new(self.client.clone())),
            Route::Edit(exercise) => Page::Edit(EditPage::new(self.client.clone(), exercise)),
        };
        self.route = route;
        matches!(self.route, Route::Home).then(|| self.home.load())
    }

    /// Apply a form outcome: surface its notice and follow its route.
    pub fn finish(&mut self, outcome: Outcome) -> (Notice, Option<HttpRequest>) {
        let refresh = self.navigate(outcome.route);
        (outcome.notice, refresh)
    }
}
