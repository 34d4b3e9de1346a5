//! Answer matching and unification queries over higher-order terms.

use clap::Parser;
use coramatch::{flatten_nested_results, par, parse, read, seq, Error, Opt};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();

    // if a precise number of parallel jobs has been given
    if let Some(Some(jobs)) = opt.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|_| Error::Thread)?;
    }

    // lazily produce commands from all specified files
    let iter = opt
        .files
        .iter()
        .map(|path| Ok::<_, Error>(parse(read(path)?, &opt)));
    // box the iterator to control type size growth
    let mut iter = Box::new(flatten_nested_results(iter));

    let parallel = opt.jobs.is_some();

    // if parallel execution is enabled, assume an unbounded channel by default
    let channel = if parallel {
        Some(opt.channel_capacity.unwrap_or(None))
    } else {
        opt.channel_capacity
    };

    match channel {
        Some(capacity) => {
            let (sender, receiver) = match capacity {
                Some(capacity) => flume::bounded(capacity),
                None => flume::unbounded(),
            };

            let optr = opt.clone();
            let consumer = std::thread::spawn(move || {
                let mut out = std::io::stdout().lock();
                if parallel {
                    par::consume(receiver.into_iter(), &optr, &mut out)
                } else {
                    seq::consume(receiver.into_iter(), &optr, &mut out)
                }
            });

            // sending fails prematurely if consumption fails
            // in that case, get the error below
            let _ = iter.try_for_each(|cmd| sender.send(cmd));

            // signalise that we are done sending commands
            // (otherwise the consumer will eventually wait forever)
            drop(sender);

            // wait for all commands to be consumed
            consumer.join().map_err(|_| Error::Thread)??;
        }
        None => seq::consume(iter, &opt, &mut std::io::stdout().lock())?,
    }
    Ok(())
}
