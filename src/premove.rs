// This file is part of the boardview library.
// Copyright (C) 2026 The boardview developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Moves queued for a side before it is that side's turn.

use std::collections::{vec_deque, VecDeque};

use crate::{color::Color, square::Square, types::{Origin, Piece}};

/// A queued move.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Premove {
    pub source: Origin,
    /// `None` removes the piece from the board.
    pub target: Option<Square>,
    pub piece: Piece,
}

/// Result of [`PremoveQueue::attempt()`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PremoveAttempt {
    /// There was nothing to attempt.
    Empty,
    /// The head belongs to the side that just moved, so it is not yet its
    /// turn.
    Ineligible,
    /// The head was accepted and removed from the queue.
    Accepted(Premove),
    /// The head was rejected and the whole queue was discarded.
    Rejected(Premove),
}

/// First-in first-out queue of [`Premove`]s, together with the side that
/// made the last confirmed move.
///
/// Only the head is ever attempted. A rejected head invalidates every move
/// queued behind it, since they were planned on a board that will not come
/// to pass.
///
/// # Examples
///
/// ```
/// use boardview::{Color, Premove, PremoveAttempt, PremoveQueue, Square};
///
/// let mut queue = PremoveQueue::new();
/// queue.set_last_moved(Some(Color::White));
/// queue.enqueue(Premove {
///     source: Square::E2.into(),
///     target: Some(Square::E4),
///     piece: Color::White.pawn(),
/// });
///
/// // White just moved, so white's premove has to wait.
/// assert_eq!(queue.attempt(Some(Color::White), |_| true), PremoveAttempt::Ineligible);
///
/// // Black replied.
/// assert!(matches!(queue.attempt(Some(Color::Black), |_| true), PremoveAttempt::Accepted(_)));
/// assert!(queue.is_empty());
/// assert_eq!(queue.last_moved(), Some(Color::White));
/// ```
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct PremoveQueue {
    queue: VecDeque<Premove>,
    last_moved: Option<Color>,
}

impl PremoveQueue {
    pub fn new() -> PremoveQueue {
        PremoveQueue::default()
    }

    /// Appends a premove. Deciding that the move must be queued rather than
    /// played is up to the caller.
    pub fn enqueue(&mut self, premove: Premove) {
        self.queue.push_back(premove);
    }

    /// Attempts the head of the queue, unless it belongs to `moved_side`.
    ///
    /// `submit` decides whether the move is accepted. It is only called
    /// for an eligible head.
    pub fn attempt<F>(&mut self, moved_side: Option<Color>, submit: F) -> PremoveAttempt
    where
        F: FnOnce(&Premove) -> bool,
    {
        let Some(&head) = self.queue.front() else {
            return PremoveAttempt::Empty;
        };

        if Some(head.piece.color) == moved_side {
            return PremoveAttempt::Ineligible;
        }

        if submit(&head) {
            self.queue.pop_front();
            self.last_moved = Some(head.piece.color);
            PremoveAttempt::Accepted(head)
        } else {
            self.queue.clear();
            PremoveAttempt::Rejected(head)
        }
    }

    /// Discards all premoves. Resetting the last moved side is meant for
    /// full board resets, not for a user clearing their premoves.
    pub fn clear(&mut self, reset_last_moved: bool) {
        self.queue.clear();
        if reset_last_moved {
            self.last_moved = None;
        }
    }

    /// The side that made the last confirmed move.
    pub fn last_moved(&self) -> Option<Color> {
        self.last_moved
    }

    pub fn set_last_moved(&mut self, side: Option<Color>) {
        self.last_moved = side;
    }

    /// Tests if any premove of the given side is queued.
    pub fn has_side(&self, color: Color) -> bool {
        self.queue.iter().any(|premove| premove.piece.color == color)
    }

    pub fn head(&self) -> Option<&Premove> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Premove> {
        self.queue.iter()
    }

    /// Tests if a queued premove starts or ends on the square.
    pub fn touches(&self, sq: Square) -> bool {
        self.squares().any(|touched| touched == sq)
    }

    /// Every square a queued premove starts or ends on, in queue order.
    /// Squares may repeat.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.queue
            .iter()
            .flat_map(|premove| premove.source.square().into_iter().chain(premove.target))
    }
}

impl<'a> IntoIterator for &'a PremoveQueue {
    type Item = &'a Premove;
    type IntoIter = vec_deque::Iter<'a, Premove>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premove(from: Square, to: Square, piece: Piece) -> Premove {
        Premove {
            source: Origin::Square(from),
            target: Some(to),
            piece,
        }
    }

    #[test]
    fn test_rejection_clears_whole_queue() {
        let mut queue = PremoveQueue::new();
        queue.enqueue(premove(Square::E2, Square::E4, Color::White.pawn()));
        queue.enqueue(premove(Square::G1, Square::F3, Color::White.knight()));
        queue.enqueue(premove(Square::F1, Square::C4, Color::White.bishop()));

        let attempt = queue.attempt(Some(Color::Black), |_| false);
        assert_eq!(
            attempt,
            PremoveAttempt::Rejected(premove(Square::E2, Square::E4, Color::White.pawn()))
        );
        assert!(queue.is_empty());
        assert_eq!(queue.last_moved(), None);
    }

    #[test]
    fn test_fifo() {
        let mut queue = PremoveQueue::new();
        queue.enqueue(premove(Square::E2, Square::E4, Color::White.pawn()));
        queue.enqueue(premove(Square::G1, Square::F3, Color::White.knight()));

        let mut submitted = Vec::new();
        let attempt = queue.attempt(None, |m| {
            submitted.push(*m);
            true
        });
        assert!(matches!(attempt, PremoveAttempt::Accepted(_)));
        assert_eq!(submitted, [premove(Square::E2, Square::E4, Color::White.pawn())]);
        assert_eq!(queue.head(), Some(&premove(Square::G1, Square::F3, Color::White.knight())));
        assert_eq!(queue.last_moved(), Some(Color::White));

        // White is now the side that moved last, so its next premove waits.
        assert_eq!(queue.attempt(queue.last_moved(), |_| true), PremoveAttempt::Ineligible);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_empty() {
        let mut queue = PremoveQueue::new();
        assert_eq!(queue.attempt(None, |_| unreachable!()), PremoveAttempt::Empty);
    }

    #[test]
    fn test_clear() {
        let mut queue = PremoveQueue::new();
        queue.set_last_moved(Some(Color::Black));
        queue.enqueue(premove(Square::E7, Square::E5, Color::Black.pawn()));
        assert!(queue.has_side(Color::Black));
        assert!(!queue.has_side(Color::White));
        assert!(queue.touches(Square::E7));
        assert!(queue.touches(Square::E5));
        assert!(!queue.touches(Square::E6));

        queue.clear(false);
        assert!(queue.is_empty());
        assert_eq!(queue.last_moved(), Some(Color::Black));

        queue.clear(true);
        assert_eq!(queue.last_moved(), None);
    }

    #[test]
    fn test_squares() {
        let mut queue = PremoveQueue::new();
        queue.enqueue(premove(Square::G1, Square::F3, Color::White.knight()));
        queue.enqueue(Premove {
            source: Origin::Spare,
            target: Some(Square::D4),
            piece: Color::White.queen(),
        });
        assert_eq!(
            queue.squares().collect::<Vec<_>>(),
            vec![Square::G1, Square::F3, Square::D4]
        );
        assert!(queue.touches(Square::D4));
        assert!(!queue.touches(Square::E2));
    }
}
