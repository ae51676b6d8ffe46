//! Replay correctness property: for any command sequence, a fresh load from
//! the journal is query-identical to applying the sequence in one session.

use crate::prelude::*;
use prevalent::Engine;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum CalcOp {
    Add(f64),
    Sub(f64),
    Mul(f64),
    Div(f64),
}

impl CalcOp {
    fn transact(self, app: &Engine<Calc>) {
        match self {
            Self::Add(amount) => app.transact(Add { amount }).unwrap(),
            Self::Sub(amount) => app.transact(Sub { amount }).unwrap(),
            Self::Mul(amount) => app.transact(Mul { amount }).unwrap(),
            Self::Div(amount) => app.transact(Div { amount }).unwrap(),
        }
    }
}

// Finite, non-zero-divisor amounts: JSON has no encoding for NaN or
// infinity, and the engine makes no promises about states that cannot be
// serialized.
fn arb_op() -> impl Strategy<Value = CalcOp> {
    prop_oneof![
        (-1000.0..1000.0f64).prop_map(CalcOp::Add),
        (-1000.0..1000.0f64).prop_map(CalcOp::Sub),
        (-8.0..8.0f64).prop_map(CalcOp::Mul),
        (1.0..8.0f64).prop_map(CalcOp::Div),
    ]
}

proptest! {
    #[test]
    fn fresh_load_is_query_identical(ops in proptest::collection::vec(arb_op(), 0..32)) {
        let (_dir, path) = temp_journal();

        let live_total = {
            let app = load(&path);
            for op in ops.iter() {
                op.transact(&app);
            }
            app.query(Total)
        };

        // Reload twice: once replaying the journal entries, once from the
        // compacted snapshot alone.
        for _ in 0..2 {
            let app = load(&path);
            prop_assert_eq!(app.query(Total).to_bits(), live_total.to_bits());
        }
    }
}
