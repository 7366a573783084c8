use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use moon_blk::{BlockError, DiskConfig, FifoQueue, Outcome, RamDisk, Request, RequestQueue};

const SECTOR: usize = 512;
const SECTORS: u64 = 256;

fn snapshot(disk: &RamDisk) -> Vec<u8> {
    disk.store().with_bytes(|bytes| bytes.to_vec())
}

#[test]
fn in_bounds_ranges_round_trip() {
    let disk = RamDisk::new(DiskConfig::new("moon0", SECTOR, SECTORS).unwrap()).unwrap();
    let mut dispatcher = disk.dispatcher();
    let mut rng = StdRng::seed_from_u64(0x6d6f6f6e);

    for _ in 0..200 {
        let start = rng.gen_range(0..SECTORS);
        let count = rng.gen_range(0..=SECTORS - start);
        let len = count as usize * SECTOR;
        let mut data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let expected = data.clone();
        let mut out = vec![0u8; len];

        let mut queue = FifoQueue::new();
        queue.push(Request::write(start, count, &mut data));
        queue.push(Request::read(start, count, &mut out));
        let summary = dispatcher.drain(&mut queue, |_| {});
        assert_eq!(summary.completed, 2, "range {}+{}", start, count);
        assert_eq!(out, expected, "range {}+{}", start, count);
    }
}

#[test]
fn out_of_bounds_ranges_change_nothing() {
    let disk = RamDisk::new(DiskConfig::new("moon0", SECTOR, SECTORS).unwrap()).unwrap();
    let mut dispatcher = disk.dispatcher();
    let mut rng = StdRng::seed_from_u64(0x30);

    let mut seed = vec![0u8; SECTOR * SECTORS as usize];
    rng.fill(&mut seed[..]);
    let mut queue = FifoQueue::new();
    queue.push(Request::write(0, SECTORS, &mut seed));
    dispatcher.drain(&mut queue, |req| assert_eq!(req.outcome(), Outcome::Completed));
    let before = snapshot(&disk);

    for _ in 0..200 {
        let start = rng.gen_range(0..SECTORS + 8);
        let count = rng.gen_range(SECTORS.saturating_sub(start) + 1..=SECTORS + 8);
        let mut data = vec![0xee; count as usize * SECTOR];

        let mut request = Request::write(start, count, &mut data);
        dispatcher.process(&mut request);
        assert_eq!(
            request.outcome(),
            Outcome::Failed(BlockError::BeyondEnd { start_sector: start, sector_count: count })
        );
    }
    assert_eq!(snapshot(&disk), before);
}

#[test]
fn huge_sector_numbers_never_wrap() {
    let disk = RamDisk::new(DiskConfig::new("moon0", SECTOR, SECTORS).unwrap()).unwrap();
    let mut dispatcher = disk.dispatcher();
    let mut rng = StdRng::seed_from_u64(7);
    let before = snapshot(&disk);

    for _ in 0..200 {
        let start = rng.gen_range(u64::MAX / 1024..=u64::MAX);
        let count = rng.gen_range(0..=u64::MAX);
        let mut request = Request::write(start, count, &mut []);
        dispatcher.process(&mut request);
        assert!(matches!(request.outcome(), Outcome::Failed(BlockError::BeyondEnd { .. })));
    }
    assert_eq!(snapshot(&disk), before);
}
