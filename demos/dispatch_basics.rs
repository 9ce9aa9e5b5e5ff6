//! Walk-through of the dispatcher lifecycle: submit, drain, interrupt

use millrace::prelude::*;

use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

fn main() {
    // Log dispatcher lifecycle events unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("millrace=debug")),
        )
        .init();

    println!("=== Dispatcher Basics ===\n");

    current_thread_drain();
    pooled_drain();
    interrupted_drain();

    println!("=== Done ===");
}

fn current_thread_drain() {
    println!("1. Current-thread drain");

    let dispatcher = Dispatcher::new();

    let answer = dispatcher.submit(|| 6 * 7);
    let greeting = dispatcher.submit(|| String::from("hello"));

    // No workers were spawned, so the caller drains the queue itself.
    dispatcher.finish();
    let outcome = dispatcher.run();

    println!("   outcome:  {:?}", outcome);
    println!("   answer:   {}", answer.join().unwrap());
    println!("   greeting: {}\n", greeting.join().unwrap());
}

fn pooled_drain() {
    println!("2. Worker pool drain");

    let config = Config::builder().workers(4).build().unwrap();
    let dispatcher = Dispatcher::with_config(config).unwrap();
    let workers = dispatcher.spawn_pool().unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            dispatcher.submit(move || {
                thread::sleep(Duration::from_millis(5));
                i * i
            })
        })
        .collect();

    dispatcher.finish();

    let total: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    for worker in workers {
        worker.join().unwrap();
    }

    let stats = dispatcher.stats();
    println!("   sum of squares: {}", total);
    println!(
        "   {} tasks executed at {:.0} tasks/sec\n",
        stats.tasks_executed,
        stats.throughput()
    );
}

fn interrupted_drain() {
    println!("3. Interrupt");

    let config = Config::builder().workers(2).build().unwrap();
    let dispatcher = Dispatcher::with_config(config).unwrap();
    let workers = dispatcher.spawn_pool().unwrap();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            dispatcher.submit(move || {
                thread::sleep(Duration::from_millis(10));
                i
            })
        })
        .collect();

    // Let a few tasks through, then stop the line.
    thread::sleep(Duration::from_millis(25));
    dispatcher.interrupt();

    for worker in workers {
        println!("   worker stopped: {:?}", worker.join().unwrap());
    }

    let ran = handles.iter().filter(|h| h.is_ready()).count();
    println!("   {} of 32 tasks ran before the interrupt", ran);
    println!(
        "   {} tasks abandoned in the queue\n",
        dispatcher.pending_tasks()
    );
}
