//! Tests for progress display bookkeeping

#[cfg(test)]
mod tests {
    use std::path::Path;

    use porestat::algorithm::record::Stage;
    use porestat::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use porestat::io::progress::ProgressManager;

    // Tests that small sets get individual bars only
    // Verified by always adding the batch bar
    #[test]
    fn test_individual_mode() {
        let mut manager = ProgressManager::new();
        manager.initialize(3);

        assert!(!manager.is_batched());
    }

    // Tests that large sets switch to batch mode
    // Verified by comparing against the bar limit without the extra slot
    #[test]
    fn test_batch_mode() {
        let mut manager = ProgressManager::new();
        manager.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 2);
        assert!(manager.is_batched());

        let mut boundary = ProgressManager::new();
        boundary.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 1);
        assert!(!boundary.is_batched());
    }

    // Tests a full volume lifecycle with more volumes than bars
    // Verified by indexing bars by volume number
    #[test]
    fn test_lifecycle() {
        let mut manager = ProgressManager::new();
        let count = MAX_INDIVIDUAL_PROGRESS_BARS * 2;
        manager.initialize(count);

        for index in 0..count {
            manager.start_volume(index, Path::new("scans/core"), Stage::ALL.len());
            for (completed, stage) in Stage::ALL.iter().enumerate() {
                manager.update_stage(index, completed, Some(*stage));
            }
            manager.update_stage(index, Stage::ALL.len(), None);
            manager.complete_volume(index);
        }
        // Unknown indices are ignored
        manager.update_stage(count + 3, 1, None);
        manager.complete_volume(count + 3);
        manager.finish();

        assert!(manager.is_batched());
    }
}
