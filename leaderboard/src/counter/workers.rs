// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::thread;
use std::thread::JoinHandle;

use crossbeam::channel::Sender;
use crossbeam::channel::bounded;

use crate::counter::Counter;
use crate::list::TopList;

const CHANNEL_CAPACITY: usize = 4096;

/// Applies observations to a shared counter from a pool of worker threads.
///
/// [`Counter::observe`] only enqueues the key. [`Counter::barrier`] closes the queue and
/// joins every worker, after which the ranking reflects all submitted keys. Observations
/// made after the barrier are applied inline.
///
/// With more than one worker the order in which keys reach the inner counter depends on
/// thread scheduling. Order-sensitive counters such as [`crate::counter::HeavyKeeper`] may
/// then rank differently between runs over identical input.
pub struct Workers<C> {
    inner: Arc<Mutex<C>>,
    sender: Option<Sender<String>>,
    handles: Vec<JoinHandle<()>>,
}

impl<C: Counter + Send + 'static> Workers<C> {
    /// Starts `workers` threads feeding `counter`.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero.
    pub fn new(counter: C, workers: usize) -> Self {
        assert!(workers >= 1, "workers must be at least 1");
        let inner = Arc::new(Mutex::new(counter));
        let (sender, receiver) = bounded::<String>(CHANNEL_CAPACITY);
        let handles = (0..workers)
            .map(|_| {
                let receiver = receiver.clone();
                let inner = Arc::clone(&inner);
                thread::spawn(move || {
                    for key in receiver.iter() {
                        lock(&inner).observe(&key);
                    }
                })
            })
            .collect();
        log::debug!("started {workers} counter workers");
        Self {
            inner,
            sender: Some(sender),
            handles,
        }
    }

    /// Returns the number of running workers.
    pub fn num_workers(&self) -> usize {
        self.handles.len()
    }

    fn join(&mut self) {
        // Dropping the only sender ends every worker's receive loop once the queue drains.
        self.sender = None;
        for handle in self.handles.drain(..) {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
    }
}

impl<C: Counter + Send + 'static> Counter for Workers<C> {
    fn observe(&mut self, key: &str) {
        let disconnected = match &self.sender {
            Some(sender) => sender.send(key.to_string()).is_err(),
            None => {
                lock(&self.inner).observe(key);
                return;
            }
        };
        if disconnected {
            // Every worker is gone; join to surface the panic that stopped them.
            self.join();
        }
    }

    fn barrier(&mut self) {
        self.join();
        lock(&self.inner).barrier();
    }

    fn ranked(&self, k: usize) -> TopList {
        lock(&self.inner).ranked(k)
    }
}

impl<C> Drop for Workers<C> {
    fn drop(&mut self) {
        self.sender = None;
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn lock<C>(inner: &Mutex<C>) -> MutexGuard<'_, C> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
