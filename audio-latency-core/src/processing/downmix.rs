/// Downmix planar multi-channel audio to mono by averaging channels per frame.
///
/// Planes are scanned in order and scanning stops at the first absent plane;
/// planes after a gap are never looked at. The result is written into `mono`
/// (cleared and resized to `frames`), so the caller can reuse one allocation
/// across callbacks.
///
/// Returns the number of active channels. When it is zero, `mono` holds
/// silence and the frame carries no audio.
pub fn downmix_planes_into(planes: &[Option<&[f32]>], frames: usize, mono: &mut Vec<f32>) -> usize {
    mono.clear();
    mono.resize(frames, 0.0);

    let mut channels = 0usize;
    for plane in planes.iter().map_while(|p| *p) {
        for (acc, &sample) in mono.iter_mut().zip(plane) {
            *acc += sample;
        }
        channels += 1;
    }

    if channels > 1 {
        let count = channels as f32;
        for sample in mono.iter_mut() {
            *sample /= count;
        }
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downmix_planes(planes: &[Option<&[f32]>], frames: usize) -> Vec<f32> {
        let mut mono = Vec::new();
        downmix_planes_into(planes, frames, &mut mono);
        mono
    }

    #[test]
    fn constant_channels_average_to_same_value() {
        for channels in [1usize, 2, 6] {
            for value in [0.0f32, 1.0, -0.5] {
                let plane = vec![value; 64];
                let planes: Vec<Option<&[f32]>> = (0..channels).map(|_| Some(plane.as_slice())).collect();

                let mono = downmix_planes(&planes, 64);

                assert_eq!(mono.len(), 64);
                assert!(
                    mono.iter().all(|&s| s == value),
                    "channels={} value={}",
                    channels,
                    value
                );
            }
        }
    }

    #[test]
    fn stereo_is_averaged_per_frame() {
        let left = [1.0f32, 0.0, -1.0];
        let right = [0.0f32, 0.5, 1.0];

        let mono = downmix_planes(&[Some(&left[..]), Some(&right[..])], 3);

        assert_eq!(mono, vec![0.5, 0.25, 0.0]);
    }

    #[test]
    fn scanning_stops_at_first_gap() {
        let a = [1.0f32; 4];
        let b = [3.0f32; 4];
        let ignored = [100.0f32; 4];

        let mut mono = Vec::new();
        let channels = downmix_planes_into(&[Some(&a[..]), Some(&b[..]), None, Some(&ignored[..])], 4, &mut mono);

        assert_eq!(channels, 2);
        assert_eq!(mono, vec![2.0; 4]);
    }

    #[test]
    fn no_active_planes_yields_silence() {
        let mut mono = vec![9.0; 8];
        let channels = downmix_planes_into(&[None, None], 4, &mut mono);

        assert_eq!(channels, 0);
        assert_eq!(mono, vec![0.0; 4]);
    }

    #[test]
    fn scratch_is_reused() {
        let plane = [0.25f32; 16];
        let mut mono = Vec::with_capacity(1024);
        let before = mono.capacity();

        downmix_planes_into(&[Some(&plane[..])], 16, &mut mono);

        assert_eq!(mono.capacity(), before);
        assert_eq!(mono.len(), 16);
    }
}
