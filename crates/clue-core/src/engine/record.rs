use crate::engine::observation::Suggestion;
use crate::model::card::Card;
use std::io;

/// How one player figured in a turn, in roster order: passed, showed an
/// unknown card, showed this exact card to the observer, or was never
/// asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEntry {
    Pass,
    Showed,
    Revealed(Card),
    Quiet,
}

/// Flat journal line for one processed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn: u32,
    pub suggesting_player: String,
    pub suggestion: Suggestion,
    pub entries: Vec<(String, TurnEntry)>,
}

/// Injected persistence collaborator. The engine appends one record per
/// processed turn and never reads anything back.
pub trait TurnSink {
    fn append_turn_record(&mut self, record: &TurnRecord) -> io::Result<()>;
}

/// Discards every record.
#[derive(Debug, Default)]
pub struct NullSink;

impl TurnSink for NullSink {
    fn append_turn_record(&mut self, _record: &TurnRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps records in memory; used by tests and snapshot consumers.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<TurnRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }
}

impl TurnSink for MemorySink {
    fn append_turn_record(&mut self, record: &TurnRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Lets a caller keep a handle on a sink it hands to the engine.
impl<S: TurnSink> TurnSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn append_turn_record(&mut self, record: &TurnRecord) -> io::Result<()> {
        self.borrow_mut().append_turn_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySink, TurnEntry, TurnRecord, TurnSink};
    use crate::engine::observation::Suggestion;
    use crate::model::card::Card;
    use crate::model::domain::CardDomain;

    #[test]
    fn memory_sink_retains_records() {
        let domain = CardDomain::standard();
        let suggestion =
            Suggestion::classify(&domain, &[Card::White, Card::Rope, Card::Study]).unwrap();
        let record = TurnRecord {
            turn: 0,
            suggesting_player: "Helena".to_string(),
            suggestion,
            entries: vec![
                ("Helena".to_string(), TurnEntry::Quiet),
                ("Chloe".to_string(), TurnEntry::Pass),
                ("Gabe".to_string(), TurnEntry::Showed),
            ],
        };
        let mut sink = MemorySink::new();
        sink.append_turn_record(&record).unwrap();
        assert_eq!(sink.records(), &[record]);
    }
}
