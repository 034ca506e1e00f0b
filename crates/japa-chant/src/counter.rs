use crate::vocabulary::Vocabulary;

/// A counted increment produced by one transcript update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChantDelta {
    /// How many new matches this update contributed.
    pub added: u64,
    /// The running total after applying the increment.
    pub total: u64,
}

/// Attributes vocabulary matches in a live transcript to a running total,
/// counting each occurrence exactly once.
///
/// Recognition engines re-deliver the full transcript of the current
/// utterance on every interim result, so the same matches are observed many
/// times. The counter keeps a per-utterance baseline (the match count already
/// attributed to the current utterance) and only adds the positive difference
/// between the latest observation and that baseline.
///
/// The running total is monotonic. When the engine replaces a transcript with
/// a rewritten alternative containing fewer matches, the difference is
/// negative and nothing happens: the baseline is not reduced and the total
/// never decreases. Corrections can therefore undercount, but a correction
/// can never take back chants already shown to the user.
#[derive(Debug, Clone)]
pub struct ChantCounter {
    vocabulary: Vocabulary,
    /// Matches already attributed to the current utterance.
    baseline: usize,
    /// Cumulative chant count across utterances and sessions.
    total: u64,
}

impl ChantCounter {
    /// Creates a counter starting from a previously persisted total.
    pub fn new(vocabulary: Vocabulary, initial_total: u64) -> Self {
        Self {
            vocabulary,
            baseline: 0,
            total: initial_total,
        }
    }

    /// The current running total.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Processes one recognition result for the current utterance.
    ///
    /// `transcript` is the full text of the utterance as known so far, not a
    /// delta; it may grow, shrink, or be replaced between calls. `is_final`
    /// is true only on the terminal delivery for the utterance, after which
    /// the next result belongs to a fresh utterance.
    ///
    /// Returns the increment applied to the running total, if any. The caller
    /// is responsible for persisting the new total and notifying the user.
    pub fn on_transcript_update(&mut self, transcript: &str, is_final: bool) -> Option<ChantDelta> {
        let current = self.vocabulary.count_matches(transcript);

        let mut counted = None;
        if current > self.baseline {
            let added = (current - self.baseline) as u64;
            self.total += added;
            self.baseline = current;
            counted = Some(ChantDelta {
                added,
                total: self.total,
            });
        }

        if is_final {
            self.baseline = 0;
        }

        counted
    }

    /// Marks the start of a new utterance. Called when a recognition session
    /// starts and whenever the engine restarts after stopping on its own.
    pub fn on_utterance_boundary(&mut self) {
        self.baseline = 0;
    }

    /// Clears the running total. Returns the new total (always 0).
    pub fn reset(&mut self) -> u64 {
        self.total = 0;
        self.baseline = 0;
        self.total
    }

    /// Adds exactly one chant, bypassing transcript state entirely. This is
    /// the fallback path when speech recognition is unavailable; it cannot
    /// disturb the per-utterance baseline. Returns the new total.
    pub fn manual_increment(&mut self) -> u64 {
        self.total += 1;
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> ChantCounter {
        ChantCounter::new(Vocabulary::defaults(), 0)
    }

    #[test]
    fn growing_transcript_counts_each_match_once() {
        let mut counter = counter();

        let first = counter.on_transcript_update("hare", false).unwrap();
        assert_eq!(first, ChantDelta { added: 1, total: 1 });

        let second = counter.on_transcript_update("hare krishna", false).unwrap();
        assert_eq!(second, ChantDelta { added: 1, total: 2 });

        let third = counter
            .on_transcript_update("hare krishna hare", true)
            .unwrap();
        assert_eq!(third, ChantDelta { added: 1, total: 3 });

        assert_eq!(counter.total(), 3);
    }

    #[test]
    fn redelivered_transcript_adds_nothing() {
        let mut counter = counter();
        counter.on_transcript_update("hare krishna", false);
        assert_eq!(counter.on_transcript_update("hare krishna", false), None);
        assert_eq!(counter.total(), 2);
    }

    #[test]
    fn shrinking_transcript_never_decreases_total() {
        let mut counter = counter();
        counter.on_transcript_update("hare krishna hare", false);
        assert_eq!(counter.total(), 3);

        // Engine correction drops one match: the difference is negative, so
        // nothing is counted and the baseline stays at 3.
        assert_eq!(counter.on_transcript_update("hare krishna", false), None);
        assert_eq!(counter.total(), 3);

        // Growing back to three matches is still covered by the baseline.
        assert_eq!(
            counter.on_transcript_update("hare krishna govinda", false),
            None
        );
        assert_eq!(counter.total(), 3);

        // Only a fourth match produces a new increment.
        let delta = counter
            .on_transcript_update("hare krishna govinda ram", false)
            .unwrap();
        assert_eq!(delta, ChantDelta { added: 1, total: 4 });
    }

    #[test]
    fn final_result_resets_the_baseline() {
        let mut counter = counter();
        counter.on_transcript_update("hare krishna", true);
        assert_eq!(counter.total(), 2);

        // A fresh utterance with the same text counts again in full.
        let delta = counter.on_transcript_update("hare krishna", true).unwrap();
        assert_eq!(delta, ChantDelta { added: 2, total: 4 });
    }

    #[test]
    fn consecutive_utterances_sum_their_counts() {
        let mut counter = counter();
        counter.on_transcript_update("hare krishna hare", true);
        counter.on_utterance_boundary();
        counter.on_transcript_update("govinda ram", true);
        assert_eq!(counter.total(), 5);
    }

    #[test]
    fn boundary_mid_utterance_discards_pending_baseline() {
        let mut counter = counter();
        counter.on_transcript_update("hare", false);
        counter.on_utterance_boundary();

        // Recognition restarted; the same words are a new utterance.
        let delta = counter.on_transcript_update("hare", false).unwrap();
        assert_eq!(delta, ChantDelta { added: 1, total: 2 });
    }

    #[test]
    fn empty_transcript_is_a_no_op() {
        let mut counter = counter();
        assert_eq!(counter.on_transcript_update("", false), None);
        assert_eq!(counter.on_transcript_update("no matches here", false), None);
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut counter = counter();
        counter.on_transcript_update("hare krishna", false);
        assert_eq!(counter.reset(), 0);
        assert_eq!(counter.reset(), 0);
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn manual_increment_adds_exactly_one() {
        let mut counter = counter();
        for expected in 1..=5 {
            assert_eq!(counter.manual_increment(), expected);
        }
        assert_eq!(counter.total(), 5);
    }

    #[test]
    fn manual_increment_does_not_disturb_automatic_counting() {
        let mut counter = counter();
        counter.on_transcript_update("hare", false);
        counter.manual_increment();

        // The baseline still reflects one automatic match, so re-delivery of
        // the same transcript adds nothing.
        assert_eq!(counter.on_transcript_update("hare", false), None);
        assert_eq!(counter.total(), 2);
    }

    #[test]
    fn starts_from_persisted_total() {
        let mut counter = ChantCounter::new(Vocabulary::defaults(), 108);
        let delta = counter.on_transcript_update("om", true).unwrap();
        assert_eq!(
            delta,
            ChantDelta {
                added: 1,
                total: 109
            }
        );
    }
}
