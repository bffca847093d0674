//! Bounded worker pool over the request list.
//!
//! Up to `jobs` threads pop requests from a shared queue until it is empty.
//! Results are collected over a channel and put back into request order.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use super::{run_one, RequestOutcome};
use crate::control::CancelToken;
use crate::fetcher::Fetcher;
use crate::http::HttpClient;
use crate::request::DownloadRequest;
use crate::storage::FileStore;

pub(super) fn run_parallel<H, S>(
    fetcher: &Fetcher<H, S>,
    requests: &[DownloadRequest],
    jobs: usize,
    cancel: &CancelToken,
) -> Vec<RequestOutcome>
where
    H: HttpClient,
    S: FileStore,
{
    let work: Mutex<VecDeque<(usize, &DownloadRequest)>> =
        Mutex::new(requests.iter().enumerate().collect());
    let (tx, rx) = mpsc::channel::<(usize, RequestOutcome)>();
    let num_workers = jobs.min(requests.len());

    thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            scope.spawn(move || loop {
                let next = match work.lock() {
                    Ok(mut queue) => queue.pop_front(),
                    Err(_) => None,
                };
                let Some((index, request)) = next else {
                    break;
                };
                if tx.send((index, run_one(fetcher, request, cancel))).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    // Every index is filled: `thread::scope` re-raises worker panics.
    let mut slots: Vec<Option<RequestOutcome>> = requests.iter().map(|_| None).collect();
    for (index, outcome) in rx {
        slots[index] = Some(outcome);
    }
    slots.into_iter().flatten().collect()
}
