// truncates toward zero
pub fn calculate_progress(total_tasks: u32, completed_tasks: u32) -> u8 {
    if total_tasks == 0 {
        return 0;
    }

    let completed = u64::from(completed_tasks.min(total_tasks));
    (completed * 100 / u64::from(total_tasks)) as u8
}
