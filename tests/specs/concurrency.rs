//! Concurrent transactions are serialized by the handle's single lock.

use crate::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_additive_commands_sum_exactly() {
    const WORKERS: usize = 8;
    const COMMANDS: usize = 100;
    const AMOUNT: f64 = 3.0;

    let (_dir, path) = temp_journal();
    let app = Arc::new(load(&path));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let app = Arc::clone(&app);
            thread::spawn(move || {
                for _ in 0..COMMANDS {
                    app.transact(Add { amount: AMOUNT }).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (WORKERS * COMMANDS) as f64 * AMOUNT;
    assert_eq!(app.query(Total), expected);
}

#[test]
fn mixed_concurrent_writers_interleave_safely() {
    let (_dir, path) = temp_journal();
    let app = Arc::new(load(&path));

    let adder = {
        let app = Arc::clone(&app);
        thread::spawn(move || {
            for _ in 0..500 {
                app.transact(Add { amount: 3.0 }).unwrap();
            }
        })
    };
    let subber = {
        let app = Arc::clone(&app);
        thread::spawn(move || {
            for _ in 0..500 {
                app.transact(Sub { amount: 1.0 }).unwrap();
            }
        })
    };
    adder.join().unwrap();
    subber.join().unwrap();

    assert_eq!(app.query(Total), 1000.0);
}

#[test]
fn queries_run_alongside_writers() {
    let (_dir, path) = temp_journal();
    let app = Arc::new(load(&path));

    let writer = {
        let app = Arc::clone(&app);
        thread::spawn(move || {
            for _ in 0..200 {
                app.transact(Add { amount: 1.0 }).unwrap();
            }
        })
    };
    let reader = {
        let app = Arc::clone(&app);
        thread::spawn(move || {
            let mut last = 0.0;
            for _ in 0..200 {
                let total = app.query(Total);
                // Totals only grow; a query never observes a torn value.
                assert!(total >= last);
                last = total;
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(app.query(Total), 200.0);
}
