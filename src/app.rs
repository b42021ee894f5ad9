//! Main application UI and state management.
//! Three screens share one bookmark store: dictionary search, the bookmark list and the quiz.

use dictionary_app::lookup::{LookupDispatcher, LookupOutcome};
use dictionary_app::models::dictionary_view::SearchState;
use dictionary_app::models::{
    BookmarkStore, ChallengeRequest, DictionaryView, LookupResult, QuizSession, QuizState,
};
use eframe::egui;
use tracing::debug;

/// Application screens, addressed by route path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppScreen {
    #[default]
    Dictionary,
    Bookmarks,
    Quiz,
}

impl AppScreen {
    pub const ALL: [AppScreen; 3] = [AppScreen::Dictionary, AppScreen::Bookmarks, AppScreen::Quiz];

    pub fn path(self) -> &'static str {
        match self {
            AppScreen::Dictionary => "/",
            AppScreen::Bookmarks => "/bookmarks",
            AppScreen::Quiz => "/quiz",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.path() == path)
    }

    pub fn title(self) -> &'static str {
        match self {
            AppScreen::Dictionary => "Dictionary",
            AppScreen::Bookmarks => "Bookmarks",
            AppScreen::Quiz => "Quiz",
        }
    }
}

/// Routes a finished lookup back to whoever asked for it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupTag {
    Search { generation: u64 },
    Quiz { session: u64, generation: u64 },
}

enum QuizAction {
    Submit,
    Restart,
    Retry,
    Skip,
}

pub struct DictionaryApp {
    screen: AppScreen,
    bookmarks: BookmarkStore,
    bookmarks_message: Option<String>,
    dictionary: DictionaryView,
    quiz: Option<QuizSession>,
    // Distinguishes challenge lookups of a dropped session from the current one
    quiz_session_id: u64,
    lookups: LookupDispatcher<LookupTag>,
}

impl eframe::App for DictionaryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for (tag, outcome) in self.lookups.poll() {
            self.apply_lookup(tag, outcome);
        }

        self.render_nav_bar(ctx);

        match self.screen {
            AppScreen::Dictionary => self.render_dictionary_screen(ctx),
            AppScreen::Bookmarks => self.render_bookmarks_screen(ctx),
            AppScreen::Quiz => self.render_quiz_screen(ctx),
        }
    }
}

impl DictionaryApp {
    pub fn new(
        bookmarks: BookmarkStore,
        lookups: LookupDispatcher<LookupTag>,
        initial_screen: AppScreen,
    ) -> Self {
        let mut app = Self {
            screen: AppScreen::Dictionary,
            bookmarks,
            bookmarks_message: None,
            dictionary: DictionaryView::new(),
            quiz: None,
            quiz_session_id: 0,
            lookups,
        };
        app.navigate(initial_screen);
        app
    }

    /// Switches screens. The quiz session lives only while its screen is shown.
    pub fn navigate(&mut self, screen: AppScreen) {
        if screen == self.screen {
            return;
        }
        debug!(from = self.screen.path(), to = screen.path(), "navigate");

        if self.screen == AppScreen::Quiz {
            self.quiz = None;
        }
        self.screen = screen;

        match screen {
            AppScreen::Bookmarks => {
                self.bookmarks.reload();
                self.bookmarks_message = None;
            }
            AppScreen::Quiz => self.start_quiz(),
            AppScreen::Dictionary => {}
        }
    }

    fn start_quiz(&mut self) {
        self.quiz_session_id += 1;
        let (session, request) = QuizSession::start(self.bookmarks.words().to_vec());
        self.quiz = Some(session);
        dispatch_challenge(&self.lookups, self.quiz_session_id, request);
    }

    fn apply_lookup(&mut self, tag: LookupTag, outcome: LookupOutcome) {
        match tag {
            LookupTag::Search { generation } => {
                self.dictionary.resolve_search(generation, outcome);
            }
            LookupTag::Quiz {
                session,
                generation,
            } => match &mut self.quiz {
                Some(quiz) if session == self.quiz_session_id => {
                    quiz.resolve_challenge(generation, outcome);
                }
                _ => debug!(session, "dropping definition for a closed quiz"),
            },
        }
    }

    fn render_nav_bar(&mut self, ctx: &egui::Context) {
        let mut target: Option<AppScreen> = None;

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for screen in AppScreen::ALL {
                    if ui
                        .selectable_label(self.screen == screen, screen.title())
                        .clicked()
                    {
                        target = Some(screen);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.screen.path());
                });
            });
        });

        if let Some(screen) = target {
            self.navigate(screen);
        }
    }

    fn render_dictionary_screen(&mut self, ctx: &egui::Context) {
        let mut action_search = false;
        let mut action_bookmark = false;
        let mut action_play = false;
        let mut action_bookmarks = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("English Dictionary");
            });
            ui.add_space(20.0);

            let mut query = self.dictionary.query().to_string();
            ui.horizontal(|ui| {
                let response =
                    ui.add(egui::TextEdit::singleline(&mut query).hint_text("Enter a word"));
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action_search = true;
                }
                if ui.button("Search").clicked() {
                    action_search = true;
                }
            });
            self.dictionary.set_query(&query);

            if let Some(message) = self.dictionary.message() {
                ui.colored_label(egui::Color32::RED, message);
            }

            ui.add_space(10.0);

            match self.dictionary.state() {
                SearchState::Idle | SearchState::NotFound => {}
                SearchState::Searching => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Searching...");
                    });
                }
                SearchState::Result(result) => {
                    egui::ScrollArea::vertical()
                        .id_salt("definitions")
                        .max_height(450.0)
                        .show(ui, |ui| {
                            render_lookup_result(ui, self.dictionary.query(), result);
                        });

                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if self.dictionary.has_pronunciation()
                            && ui.button("Hear Pronunciation").clicked()
                        {
                            action_play = true;
                        }
                        let bookmarked = self.bookmarks.contains(self.dictionary.query());
                        let label = if bookmarked { "Bookmarked" } else { "Bookmark Word" };
                        if ui
                            .add_enabled(self.dictionary.can_bookmark(), egui::Button::new(label))
                            .clicked()
                        {
                            action_bookmark = true;
                        }
                    });
                }
            }

            ui.add_space(20.0);
            if ui.button("Go to Bookmarks").clicked() {
                action_bookmarks = true;
            }
        });

        // Execute deferred actions
        if action_search {
            if let Some(request) = self.dictionary.submit_search() {
                self.lookups.dispatch(
                    LookupTag::Search {
                        generation: request.generation,
                    },
                    request.word,
                );
            }
        }
        if action_bookmark {
            self.dictionary.bookmark(&mut self.bookmarks);
        }
        if action_play {
            // Handed to the system handler; earlier playback keeps going
            if let Some(url) = self.dictionary.pronunciation() {
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
        }
        if action_bookmarks {
            self.navigate(AppScreen::Bookmarks);
        }
    }

    fn render_bookmarks_screen(&mut self, ctx: &egui::Context) {
        let mut action_remove: Option<String> = None;
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Bookmarked Words");
            });
            ui.add_space(20.0);

            if let Some(message) = &self.bookmarks_message {
                ui.colored_label(egui::Color32::RED, message);
            }

            if self.bookmarks.is_empty() {
                ui.label("No words bookmarked yet.");
            } else {
                egui::ScrollArea::vertical()
                    .id_salt("bookmarks_list")
                    .max_height(500.0)
                    .show(ui, |ui| {
                        for word in self.bookmarks.words() {
                            ui.group(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new(word).strong());
                                    if ui.button("Remove").clicked() {
                                        action_remove = Some(word.clone());
                                    }
                                });
                            });
                        }
                    });
            }

            ui.add_space(20.0);
            if ui.button("Go back to Dictionary").clicked() {
                action_back = true;
            }
        });

        if let Some(word) = action_remove {
            self.bookmarks_message = self
                .bookmarks
                .remove(&word)
                .err()
                .map(|e| format!("Could not remove \"{word}\": {e}"));
        }
        if action_back {
            self.navigate(AppScreen::Dictionary);
        }
    }

    fn render_quiz_screen(&mut self, ctx: &egui::Context) {
        let mut action: Option<QuizAction> = None;
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Word Quiz");
                ui.label("Test your knowledge of your bookmarked words!");
            });
            ui.add_space(10.0);

            if let Some(session) = &mut self.quiz {
                ui.label(egui::RichText::new(format!("Score: {}", session.score())).strong());
                if !session.state().is_terminal() {
                    ui.label(format!(
                        "Seen {} of {} words",
                        session.seen().len(),
                        session.bookmark_count()
                    ));
                }
                ui.add_space(20.0);

                // Clone so the answer box can borrow the session mutably
                match session.state().clone() {
                    QuizState::NoBookmarks => {
                        ui.label(session.message().unwrap_or_default());
                    }
                    QuizState::Finished => {
                        ui.heading("You've seen all bookmarked words!");
                        if let Some(feedback) = session.feedback() {
                            ui.label(feedback);
                        }
                        ui.label(format!("Your final score is: {}", session.score()));
                        ui.add_space(10.0);
                        if ui.button("Restart Quiz").clicked() {
                            action = Some(QuizAction::Restart);
                        }
                    }
                    QuizState::AwaitingChallenge { .. } => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading next question...");
                        });
                    }
                    QuizState::FetchFailed { .. } => {
                        ui.colored_label(
                            egui::Color32::RED,
                            session.message().unwrap_or_default(),
                        );
                        ui.horizontal(|ui| {
                            if ui.button("Retry").clicked() {
                                action = Some(QuizAction::Retry);
                            }
                            if ui.button("Skip").clicked() {
                                action = Some(QuizAction::Skip);
                            }
                        });
                    }
                    QuizState::Challenge(challenge) => {
                        ui.group(|ui| {
                            ui.heading("Guess the word:");
                            ui.horizontal_wrapped(|ui| {
                                ui.label(egui::RichText::new("Definition:").strong());
                                ui.label(&challenge.definition);
                            });
                            ui.add_space(10.0);

                            let response = ui.add(
                                egui::TextEdit::singleline(&mut session.answer)
                                    .hint_text("Type your answer"),
                            );
                            if response.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter))
                            {
                                action = Some(QuizAction::Submit);
                            }
                            if ui.button("Submit").clicked() {
                                action = Some(QuizAction::Submit);
                            }

                            if let Some(feedback) = session.feedback() {
                                ui.add_space(10.0);
                                ui.label(feedback);
                            }
                        });
                    }
                }
            }

            ui.add_space(20.0);
            if ui.button("Back to Dictionary").clicked() {
                action_back = true;
            }
        });

        if let (Some(action), Some(session)) = (action, self.quiz.as_mut()) {
            let outcome = match action {
                QuizAction::Submit => session.submit_answer(),
                QuizAction::Restart => session.restart(),
                QuizAction::Retry => session.retry().map(Some),
                QuizAction::Skip => session.skip(),
            };
            match outcome {
                Ok(request) => dispatch_challenge(&self.lookups, self.quiz_session_id, request),
                Err(e) => debug!(error = %e, "quiz action ignored"),
            }
        }
        if action_back {
            self.navigate(AppScreen::Dictionary);
        }
    }
}

fn dispatch_challenge(
    lookups: &LookupDispatcher<LookupTag>,
    session: u64,
    request: Option<ChallengeRequest>,
) {
    if let Some(request) = request {
        lookups.dispatch(
            LookupTag::Quiz {
                session,
                generation: request.generation,
            },
            request.word,
        );
    }
}

fn render_lookup_result(ui: &mut egui::Ui, query: &str, result: &LookupResult) {
    ui.heading(format!("Definitions for \"{query}\""));

    let phonetic_texts: Vec<&str> = result
        .phonetics
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if !phonetic_texts.is_empty() {
        ui.add_space(10.0);
        ui.weak("Phonetic:");
        for text in phonetic_texts {
            ui.label(text);
        }
    }

    if let Some(origin) = result.origin_text() {
        ui.add_space(10.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Origin:").strong());
            ui.label(origin);
        });
    }

    for meaning in &result.meanings {
        ui.add_space(15.0);
        ui.label(
            egui::RichText::new(&meaning.part_of_speech)
                .heading()
                .color(egui::Color32::LIGHT_BLUE),
        );
        for definition in &meaning.definitions {
            ui.group(|ui| {
                ui.label(egui::RichText::new(&definition.definition).strong());
                if let Some(example) = &definition.example {
                    ui.label(egui::RichText::new(format!("Example: {example}")).italics());
                }
            });
        }
    }
}
