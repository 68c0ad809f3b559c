use log::warn;

///////////////////////////////
/// Worker threads to use: the requested number, or all available cores
pub fn determine_thread_count(total: Option<usize>) -> anyhow::Result<usize> {
    if let Some(total) = total {
        if total < 1 {
            anyhow::bail!("Number of threads must be at least 1");
        }
        anyhow::Ok(total)
    } else {
        let total = std::thread::available_parallelism();
        if let Ok(total) = total {
            anyhow::Ok(total.get())
        } else {
            warn!("Could not autodetect the number of threads available. Setting to 1, but it is better if you specify");
            anyhow::Ok(1)
        }
    }
}
