use crate::config::FailureDisplay;
use crate::models::{BoardView, TourCard};
use crate::render;
use chrono::{DateTime, Local};

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Tour cards currently on display, the carousel position, and the rendered regions.
///
/// All transitions go through `&mut self`; the owner decides how the board is shared.
#[derive(Debug)]
pub struct Board {
    cards: Vec<TourCard>,
    index: usize,
    last_rendered: Option<usize>,
    issued: u64,
    loaded: bool,
    failed: bool,
    failure_display: FailureDisplay,
    last_update: String,
    view: BoardView,
}

impl Board {
    pub fn new(failure_display: FailureDisplay) -> Self {
        Self {
            cards: Vec::new(),
            index: 0,
            last_rendered: None,
            issued: 0,
            loaded: false,
            failed: false,
            failure_display,
            last_update: String::new(),
            view: BoardView {
                content: render::loading().render(),
                ..BoardView::default()
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn cards(&self) -> &[TourCard] {
        &self.cards
    }

    /// Selected card, `None` while there is nothing to show.
    pub fn index(&self) -> Option<usize> {
        (!self.cards.is_empty()).then_some(self.index)
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    #[cfg(test)]
    pub(crate) fn is_failed(&self) -> bool {
        self.failed
    }

    /// Hands out the sequence number for a new fetch. Only the latest one may apply.
    pub fn begin_request(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn apply_snapshot(&mut self, seq: u64, cards: Vec<TourCard>, now: DateTime<Local>) -> bool {
        if seq != self.issued {
            return false;
        }
        self.failed = false;
        self.last_update = format!("Last updated: {}", now.format(TIME_FORMAT));
        self.replace_cards(cards);
        true
    }

    pub fn apply_failure(&mut self, seq: u64, now: DateTime<Local>) -> bool {
        if seq != self.issued {
            return false;
        }
        self.failed = true;
        self.last_update = format!("Error: {}", now.format(TIME_FORMAT));
        self.redisplay();
        true
    }

    /// Swaps in a new card list. The index survives when it is still in range.
    pub fn replace_cards(&mut self, cards: Vec<TourCard>) {
        self.cards = cards;
        self.loaded = true;
        if self.index >= self.cards.len() {
            self.index = 0;
        }
        self.redisplay();
    }

    /// Moves to the next card, wrapping from the last back to the first.
    pub fn advance(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.cards.len();
        self.redisplay();
    }

    /// Every card at once, for the grid page. Pager state is left alone.
    pub fn grid_view(&self) -> BoardView {
        let banner = self.failed.then(render::error_banner);
        let content = match banner {
            Some(banner) if self.failure_display == FailureDisplay::Replace => banner.render(),
            banner if self.cards.is_empty() => {
                banner.map(|b| b.render()).unwrap_or_default() + &self.empty_content()
            }
            banner => render::render_all(banner.into_iter().chain(render::grid(&self.cards))),
        };

        BoardView {
            content,
            last_update: self.last_update.clone(),
            position: String::new(),
            animate: false,
            entered: 0,
            version: self.view.version,
            card_count: self.cards.len(),
        }
    }

    fn empty_content(&self) -> String {
        if !self.loaded {
            render::loading().render()
        } else {
            render::no_tours().render()
        }
    }

    fn redisplay(&mut self) {
        let selected = self.index();
        let banner = self.failed.then(render::error_banner);

        let (content, animate) = match (selected, banner) {
            // The hidden card still counts as rendered, so recovery at the same index is quiet.
            (_, Some(banner)) if self.failure_display == FailureDisplay::Replace => {
                (banner.render(), false)
            }
            (None, banner) => {
                self.last_rendered = None;
                let placeholder = banner.map(|b| b.render()).unwrap_or_default();
                (placeholder + &self.empty_content(), false)
            }
            (Some(index), banner) => {
                let animate = self.last_rendered != Some(index);
                self.last_rendered = Some(index);
                let slot = render::carousel_slot(&self.cards[index], animate);
                (render::render_all(banner.into_iter().chain([slot])), animate)
            }
        };

        self.view = BoardView {
            content,
            last_update: self.last_update.clone(),
            position: selected
                .map(|index| format!("{} / {}", index + 1, self.cards.len()))
                .unwrap_or_default(),
            animate,
            entered: self.view.entered + u64::from(animate),
            version: self.view.version + 1,
            card_count: self.cards.len(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, 29, 14, 5, 9).unwrap()
    }

    fn cards(n: usize) -> Vec<TourCard> {
        (0..n)
            .map(|i| TourCard {
                area: format!("area-{i}"),
                status: "open".into(),
                ..TourCard::default()
            })
            .collect()
    }

    fn loaded(n: usize) -> Board {
        let mut board = Board::new(FailureDisplay::Replace);
        let seq = board.begin_request();
        assert!(board.apply_snapshot(seq, cards(n), now()));
        board
    }

    #[test]
    fn starts_in_loading_state() {
        let board = Board::new(FailureDisplay::Replace);
        assert_eq!(board.index(), None);
        assert!(board.view().content.contains(render::LOADING));
        assert_eq!(board.view().position, "");
    }

    #[test]
    fn advance_wraps_to_first_card() {
        let mut board = loaded(3);
        let mut seen = Vec::new();
        for _ in 0..5 {
            board.advance();
            seen.push(board.index().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn advance_on_empty_board_is_noop() {
        let mut board = loaded(0);
        let version = board.view().version;
        board.advance();
        assert_eq!(board.index(), None);
        assert_eq!(board.view().version, version);
    }

    #[test]
    fn single_card_does_not_replay_animation() {
        let mut board = loaded(1);
        assert!(board.view().animate);
        board.advance();
        assert_eq!(board.index(), Some(0));
        assert!(!board.view().animate);
    }

    #[test]
    fn refresh_keeps_index_in_range() {
        let mut board = loaded(4);
        board.advance();
        board.advance();
        assert_eq!(board.index(), Some(2));

        let seq = board.begin_request();
        board.apply_snapshot(seq, cards(5), now());
        assert_eq!(board.index(), Some(2));
        assert!(!board.view().animate);
        assert_eq!(board.view().position, "3 / 5");
    }

    #[test]
    fn refresh_that_shrinks_list_resets_index() {
        let mut board = loaded(4);
        board.advance();
        board.advance();
        board.advance();

        let seq = board.begin_request();
        board.apply_snapshot(seq, cards(2), now());
        assert_eq!(board.index(), Some(0));
        assert!(board.view().animate);
        assert_eq!(board.view().position, "1 / 2");
    }

    #[test]
    fn empty_snapshot_shows_single_placeholder() {
        let mut board = loaded(2);
        let seq = board.begin_request();
        board.apply_snapshot(seq, Vec::new(), now());
        assert_eq!(board.index(), None);
        assert_eq!(board.view().content.matches(render::NO_TOURS).count(), 1);
        assert_eq!(board.view().position, "");
        assert_eq!(board.view().card_count, 0);
    }

    #[test]
    fn advance_animates_and_updates_position() {
        let mut board = loaded(2);
        assert_eq!(board.view().position, "1 / 2");
        assert!(board.view().content.contains("area-0"));

        board.advance();
        assert!(board.view().animate);
        assert!(board.view().content.contains("card-enter"));
        assert!(board.view().content.contains("area-1"));
        assert!(!board.view().content.contains("area-0"));
        assert_eq!(board.view().position, "2 / 2");
    }

    #[test]
    fn every_render_bumps_version() {
        let mut board = loaded(2);
        let before = board.view().version;
        board.advance();
        assert_eq!(board.view().version, before + 1);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut board = loaded(1);
        let older = board.begin_request();
        let newer = board.begin_request();

        assert!(board.apply_snapshot(newer, cards(3), now()));
        assert!(!board.apply_snapshot(older, cards(1), now()));
        assert!(!board.apply_failure(older, now()));

        assert_eq!(board.cards().len(), 3);
        assert!(!board.is_failed());
    }

    #[test]
    fn completion_superseded_by_pending_request_is_discarded() {
        let mut board = loaded(1);
        let first = board.begin_request();
        let _second = board.begin_request();
        assert!(!board.apply_snapshot(first, cards(4), now()));
        assert_eq!(board.cards().len(), 1);
    }

    #[test]
    fn last_update_labels_success_and_failure() {
        let mut board = loaded(1);
        assert_eq!(board.view().last_update, "Last updated: 29.10.2025 14:05:09");

        let seq = board.begin_request();
        board.apply_failure(seq, now());
        assert_eq!(board.view().last_update, "Error: 29.10.2025 14:05:09");
    }

    #[test]
    fn replace_policy_shows_only_the_banner() {
        let mut board = loaded(2);
        let seq = board.begin_request();
        board.apply_failure(seq, now());

        let content = &board.view().content;
        assert!(content.contains(render::LOAD_ERROR));
        assert!(!content.contains("area-0"));
        assert_eq!(board.cards().len(), 2);

        board.advance();
        assert!(board.view().content.contains(render::LOAD_ERROR));
        assert_eq!(board.index(), Some(1));

        let seq = board.begin_request();
        board.apply_snapshot(seq, cards(2), now());
        assert!(!board.view().content.contains(render::LOAD_ERROR));
        assert!(board.view().content.contains("area-1"));
        assert!(board.view().animate);
    }

    #[test]
    fn recovery_at_same_index_does_not_replay_animation() {
        let mut board = loaded(2);
        let seq = board.begin_request();
        board.apply_failure(seq, now());
        assert!(board.view().content.contains(render::LOAD_ERROR));

        let seq = board.begin_request();
        board.apply_snapshot(seq, cards(2), now());
        assert!(board.view().content.contains("area-0"));
        assert!(!board.view().animate);
        assert!(!board.view().content.contains("card-enter"));
    }

    #[test]
    fn entry_survives_a_refresh_before_the_next_poll() {
        let mut board = loaded(3);
        let before = board.view().entered;

        board.advance();
        let after_advance = board.view().clone();
        assert!(after_advance.animate);
        assert_eq!(after_advance.entered, before + 1);

        let seq = board.begin_request();
        board.apply_snapshot(seq, cards(3), now());
        let polled = board.view();
        assert!(polled.version > after_advance.version);
        assert!(!polled.animate);
        assert_eq!(polled.position, "2 / 3");
        // A client that missed the advance still sees that a new card entered.
        assert_eq!(polled.entered, after_advance.entered);
        assert_ne!(polled.entered, before);
    }

    #[test]
    fn overlay_policy_keeps_the_card() {
        let mut board = Board::new(FailureDisplay::Overlay);
        let seq = board.begin_request();
        board.apply_snapshot(seq, cards(2), now());

        let seq = board.begin_request();
        board.apply_failure(seq, now());
        let content = &board.view().content;
        assert!(content.contains(render::LOAD_ERROR));
        assert!(content.contains("area-0"));
        assert!(content.find(render::LOAD_ERROR).unwrap() < content.find("area-0").unwrap());
        assert!(!board.view().animate);
    }

    #[test]
    fn failure_before_first_load_shows_banner() {
        let mut board = Board::new(FailureDisplay::Overlay);
        let seq = board.begin_request();
        board.apply_failure(seq, now());
        assert!(board.view().content.contains(render::LOAD_ERROR));
        assert!(board.view().content.contains(render::LOADING));
    }

    #[test]
    fn grid_view_lists_every_card_without_moving_pager() {
        let mut board = loaded(3);
        board.advance();
        let grid = board.grid_view();
        for i in 0..3 {
            assert!(grid.content.contains(&format!("area-{i}")));
        }
        assert_eq!(grid.card_count, 3);
        assert_eq!(board.index(), Some(1));
    }

    #[test]
    fn grid_view_of_empty_board_shows_placeholder() {
        let board = loaded(0);
        assert_eq!(board.grid_view().content.matches(render::NO_TOURS).count(), 1);
    }
}
